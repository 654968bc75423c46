//! Maven version ordering.
//!
//! Versions are split into numeric and qualifier items on `.`, `-` and
//! digit/letter transitions. A `-` (or a digit/letter transition) opens a
//! nested list, so `1.0-alpha-2` becomes `[1, [alpha, [2]]]`.
//!
//! Qualifier order:
//! `alpha < beta < milestone < rc = cr < snapshot < "" = ga = final = release < sp`,
//! with any other qualifier sorting after `sp`, lexically.

use std::cmp::Ordering;
use std::fmt;

const QUALIFIERS: [&str; 7] = ["alpha", "beta", "milestone", "rc", "snapshot", "", "sp"];

/// Index of the release qualifier (`""`) in [`QUALIFIERS`].
const RELEASE_INDEX: &str = "5";

#[derive(Debug, Clone)]
enum Item {
    /// Decimal digits with leading zeros stripped; zero is `"0"`.
    Int(String),
    Str(String),
    List(Vec<Item>),
}

impl Item {
    fn int(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Item::Int("0".to_string())
        } else {
            Item::Int(trimmed.to_string())
        }
    }

    fn qualifier(value: &str, followed_by_digit: bool) -> Self {
        let value = match value {
            "a" if followed_by_digit => "alpha",
            "b" if followed_by_digit => "beta",
            "m" if followed_by_digit => "milestone",
            "ga" | "final" | "release" => "",
            "cr" => "rc",
            other => other,
        };
        Item::Str(value.to_string())
    }

    fn is_null(&self) -> bool {
        match self {
            Item::Int(v) => v == "0",
            Item::Str(v) => v.is_empty(),
            Item::List(items) => items.is_empty(),
        }
    }

    /// Compare against another item, where `None` stands for padding.
    fn compare(&self, other: Option<&Item>) -> Ordering {
        match (self, other) {
            (Item::Int(v), None) => {
                if v == "0" {
                    Ordering::Equal
                } else {
                    Ordering::Greater
                }
            }
            (Item::Int(a), Some(Item::Int(b))) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Item::Int(_), Some(_)) => Ordering::Greater,

            (Item::Str(v), None) => comparable_qualifier(v).as_str().cmp(RELEASE_INDEX),
            (Item::Str(a), Some(Item::Str(b))) => comparable_qualifier(a).cmp(&comparable_qualifier(b)),
            (Item::Str(_), Some(_)) => Ordering::Less,

            (Item::List(items), None) => items
                .first()
                .map_or(Ordering::Equal, |first| first.compare(None)),
            (Item::List(_), Some(Item::Int(_))) => Ordering::Less,
            (Item::List(_), Some(Item::Str(_))) => Ordering::Greater,
            (Item::List(left), Some(Item::List(right))) => compare_lists(left, right),
        }
    }
}

fn comparable_qualifier(value: &str) -> String {
    match QUALIFIERS.iter().position(|q| *q == value) {
        Some(index) => index.to_string(),
        None => format!("{}-{}", QUALIFIERS.len(), value),
    }
}

fn compare_lists(left: &[Item], right: &[Item]) -> Ordering {
    let mut l = left.iter();
    let mut r = right.iter();
    loop {
        let result = match (l.next(), r.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(ri)) => ri.compare(None).reverse(),
            (Some(li), ri) => li.compare(ri),
        };
        if result != Ordering::Equal {
            return result;
        }
    }
}

/// Drop trailing null items, looking through nested lists.
fn normalize(items: &mut Vec<Item>) {
    let mut i = items.len();
    while i > 0 {
        i -= 1;
        if items[i].is_null() {
            items.remove(i);
        } else if !matches!(items[i], Item::List(_)) {
            break;
        }
    }
}

fn parse_item(is_digit: bool, buf: &str) -> Item {
    if is_digit {
        Item::int(buf)
    } else {
        Item::qualifier(buf, false)
    }
}

fn parse_items(version: &str) -> Vec<Item> {
    let version = version.to_lowercase();
    let mut stack: Vec<Vec<Item>> = Vec::new();
    let mut list: Vec<Item> = Vec::new();
    let mut is_digit = false;
    let mut start = 0;

    for (i, c) in version.char_indices() {
        match c {
            '.' | '-' => {
                if i == start {
                    list.push(Item::int("0"));
                } else {
                    list.push(parse_item(is_digit, &version[start..i]));
                }
                start = i + 1;
                if c == '-' {
                    stack.push(std::mem::take(&mut list));
                }
            }
            c if c.is_ascii_digit() => {
                if !is_digit && i > start {
                    // `1.0.0.X1` sorts as `1.0.0-X1`
                    list.push(Item::qualifier(&version[start..i], true));
                    start = i;
                    stack.push(std::mem::take(&mut list));
                }
                is_digit = true;
            }
            _ => {
                if is_digit && i > start {
                    list.push(parse_item(true, &version[start..i]));
                    start = i;
                    stack.push(std::mem::take(&mut list));
                }
                is_digit = false;
            }
        }
    }

    if version.len() > start {
        list.push(parse_item(is_digit, &version[start..]));
    }

    while let Some(mut parent) = stack.pop() {
        normalize(&mut list);
        parent.push(Item::List(list));
        list = parent;
    }
    normalize(&mut list);
    list
}

/// A version string ordered the way Maven orders artifact versions.
#[derive(Debug, Clone)]
pub struct MavenVersion {
    raw: String,
    items: Vec<Item>,
}

impl MavenVersion {
    pub fn parse(version: &str) -> Self {
        Self {
            raw: version.to_string(),
            items: parse_items(version),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True for `-SNAPSHOT` versions.
    pub fn is_snapshot(&self) -> bool {
        self.raw.to_ascii_uppercase().ends_with("SNAPSHOT")
    }
}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for MavenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MavenVersion {}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_lists(&self.items, &other.items)
    }
}
