use std::collections::BTreeMap;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Parsed form of the address-bar fragment. Keys are unique; the
/// serialization order (descending lexicographic) is applied on write,
/// so parse order does not matter.
pub type FragmentMap = BTreeMap<String, String>;

/// Characters escaped in fragment keys and values. `=` and `&` are the
/// pair and list separators, `#` terminates the fragment marker, `%`
/// starts an escape, and the rest are not valid raw in a URL.
const FRAGMENT_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'=');

/// Parse an address-bar fragment into its key/value pairs.
///
/// The leading `#` is optional. Each `&`-separated pair splits at its
/// first `=`; both halves are percent-decoded. Pairs whose decoded key is
/// empty are dropped silently. A pair with no `=` at all ends up with an
/// empty key and the whole pair as value, so it is dropped too; that is
/// an artifact of the historical encoding, kept for compatibility, not a
/// behavior to rely on.
pub fn parse(fragment: &str) -> FragmentMap {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);

    let mut map = FragmentMap::new();
    for pair in raw.split('&') {
        let (key, value) = match pair.find('=') {
            Some(idx) => (&pair[..idx], &pair[idx + 1..]),
            None => ("", pair),
        };
        let key = percent_decode_str(key).decode_utf8_lossy();
        if key.is_empty() {
            continue;
        }
        let value = percent_decode_str(value).decode_utf8_lossy();
        map.insert(key.into_owned(), value.into_owned());
    }
    map
}

/// Serialize a fragment map to an address-bar string: keys in descending
/// lexicographic order, percent-encoded `key=value` pairs joined with
/// `&`, prefixed with `#`. `parse(serialize(m))` reproduces `m`.
pub fn serialize(map: &FragmentMap) -> String {
    let pairs: Vec<String> = map
        .iter()
        .rev()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, FRAGMENT_ESCAPE),
                utf8_percent_encode(value, FRAGMENT_ESCAPE)
            )
        })
        .collect();
    format!("#{}", pairs.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(&str, &str)]) -> FragmentMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_basic_pairs() {
        let map = parse("#map=13/51.5/-0.1&styleId=dark");
        assert_eq!(map, map_of(&[("map", "13/51.5/-0.1"), ("styleId", "dark")]));
    }

    #[test]
    fn test_parse_without_leading_hash() {
        let map = parse("a=1&b=2");
        assert_eq!(map, map_of(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn test_parse_empty_fragment() {
        assert!(parse("").is_empty());
        assert!(parse("#").is_empty());
    }

    #[test]
    fn test_parse_drops_empty_key() {
        let map = parse("#=x&y=1");
        assert_eq!(map, map_of(&[("y", "1")]));
    }

    #[test]
    fn test_parse_drops_pair_without_equals() {
        // The whole pair becomes the value of an empty key, which is dropped.
        let map = parse("#loose&y=1");
        assert_eq!(map, map_of(&[("y", "1")]));
    }

    #[test]
    fn test_parse_splits_at_first_equals() {
        let map = parse("#k=v=w");
        assert_eq!(map, map_of(&[("k", "v=w")]));
    }

    #[test]
    fn test_parse_empty_value() {
        let map = parse("#k=");
        assert_eq!(map, map_of(&[("k", "")]));
    }

    #[test]
    fn test_parse_percent_decodes() {
        let map = parse("#name=two%20words&sym=%26%3D");
        assert_eq!(map, map_of(&[("name", "two words"), ("sym", "&=")]));
    }

    #[test]
    fn test_parse_duplicate_key_last_wins() {
        let map = parse("#k=1&k=2");
        assert_eq!(map, map_of(&[("k", "2")]));
    }

    #[test]
    fn test_serialize_descending_key_order() {
        let map = map_of(&[("a", "1"), ("b", "2")]);
        assert_eq!(serialize(&map), "#b=2&a=1");
    }

    #[test]
    fn test_serialize_empty_map() {
        assert_eq!(serialize(&FragmentMap::new()), "#");
    }

    #[test]
    fn test_serialize_escapes_separators() {
        let map = map_of(&[("k", "a=b&c")]);
        let encoded = serialize(&map);
        // No raw separators after the leading '#' and the pair's own '='.
        assert_eq!(encoded, "#k=a%3Db%26c");
    }

    #[test]
    fn test_round_trip() {
        let map = map_of(&[
            ("map", "13/51.5007/-0.1246"),
            ("styleId", "open street map"),
            ("q", "100% &true"),
        ]);
        assert_eq!(parse(&serialize(&map)), map);
    }

    #[test]
    fn test_serialize_deterministic() {
        let map = map_of(&[("z", "1"), ("a", "2"), ("m", "3")]);
        assert_eq!(serialize(&map), serialize(&map.clone()));
        assert_eq!(serialize(&map), "#z=1&m=3&a=2");
    }
}
