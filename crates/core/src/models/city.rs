use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized city name used for directory lookups.
///
/// Folding trims, collapses inner whitespace, lower-cases and strips Latin
/// diacritics, so `"  São   Paulo "` and `"sao paulo"` address the same units.
/// Ligatures and letters without a decomposition are spelled out (`æ` → `ae`,
/// `ß` → `ss`, `ø` → `o`, `ł` → `l`). Letters outside the Latin script are
/// kept as they are.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CityKey(String);

impl CityKey {
    pub fn new(raw: &str) -> Self {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

        let mut folded = String::with_capacity(collapsed.len());
        for c in collapsed.chars().flat_map(char::to_lowercase) {
            match fold_latin(c) {
                Some(replacement) => folded.push_str(replacement),
                None => folded.push(c),
            }
        }
        CityKey(folded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// ASCII spelling of a lower-case Latin letter, `None` when `c` is kept.
fn fold_latin(c: char) -> Option<&'static str> {
    let folded = match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' | 'ĉ' | 'ċ' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ğ' | 'ĝ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'í' | 'ì' | 'î' | 'ï' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ł' | 'ľ' | 'ĺ' | 'ļ' | 'ŀ' => "l",
        'ñ' | 'ń' | 'ň' | 'ņ' => "n",
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'œ' => "oe",
        'ŕ' | 'ř' | 'ŗ' => "r",
        'ś' | 'š' | 'ş' | 'ș' | 'ŝ' => "s",
        'ß' => "ss",
        'ť' | 'ţ' | 'ț' | 'ŧ' => "t",
        'þ' => "th",
        'ú' | 'ù' | 'û' | 'ü' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        // Combining marks, e.g. the dot left by lower-casing 'İ'
        '\u{0300}'..='\u{036f}' => "",
        _ => return None,
    };
    Some(folded)
}

impl From<String> for CityKey {
    fn from(raw: String) -> Self {
        CityKey::new(&raw)
    }
}

impl From<&str> for CityKey {
    fn from(raw: &str) -> Self {
        CityKey::new(raw)
    }
}

impl From<CityKey> for String {
    fn from(key: CityKey) -> Self {
        key.0
    }
}

impl fmt::Display for CityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
