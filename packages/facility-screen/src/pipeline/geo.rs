//! Address handling: prefecture lookup, remote-island check, and spotting an
//! address inside search snippets.

use regex::Regex;
use std::sync::LazyLock;

use super::classify::contains_any;
use crate::types::{ReferenceTables, SearchHit};

/// From the prefecture name up to the first block number, e.g.
/// `沖縄県那覇市港町2-1-3`.
static ADDRESS_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s、。,，]*?[市区町村郡][^\s、。,，]*?[0-9０-９]+(?:[-‐－−ー][0-9０-９]+)*")
        .expect("address pattern is valid")
});

/// The prefecture appearing earliest in `address`, or "" when none does.
pub fn extract_prefecture(address: &str, prefectures: &[String]) -> String {
    earliest_prefecture(address, prefectures)
        .map(|(_, name)| name.to_string())
        .unwrap_or_default()
}

fn earliest_prefecture<'a>(text: &str, prefectures: &'a [String]) -> Option<(usize, &'a str)> {
    prefectures
        .iter()
        .filter(|p| !p.is_empty())
        .filter_map(|p| text.find(p.as_str()).map(|pos| (pos, p.as_str())))
        .min_by_key(|(pos, _)| *pos)
}

pub fn is_remote_island(address: &str, tables: &ReferenceTables) -> bool {
    !address.is_empty() && contains_any(&address.to_lowercase(), &tables.island_keywords)
}

/// Address found in `text`, starting at the earliest prefecture name.
pub fn address_in(text: &str, prefectures: &[String]) -> Option<String> {
    let (pos, _) = earliest_prefecture(text, prefectures)?;
    ADDRESS_TAIL
        .find(&text[pos..])
        .map(|m| m.as_str().to_string())
}

/// First address found across the hits' descriptions, in hit order.
pub fn find_address(hits: &[SearchHit], prefectures: &[String]) -> Option<String> {
    hits.iter()
        .find_map(|hit| address_in(&hit.description, prefectures))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> ReferenceTables {
        ReferenceTables::default()
    }

    #[test]
    fn test_extract_prefecture() {
        let t = tables();
        assert_eq!(extract_prefecture("沖縄県那覇市松山1-1", &t.prefectures), "沖縄県");
        assert_eq!(extract_prefecture("東京都渋谷区神南1-2-3", &t.prefectures), "東京都");
        assert_eq!(extract_prefecture("渋谷区神南1-2-3", &t.prefectures), "");
        assert_eq!(extract_prefecture("", &t.prefectures), "");
    }

    #[test]
    fn test_extract_prefecture_earliest_wins() {
        let t = tables();
        assert_eq!(
            extract_prefecture("京都府京都市 (大阪府からのアクセス)", &t.prefectures),
            "京都府"
        );
    }

    #[test]
    fn test_remote_island() {
        let t = tables();
        assert!(is_remote_island("沖縄県宮古島市平良", &t));
        assert!(is_remote_island("鹿児島県大島郡 奄美市", &t));
        assert!(!is_remote_island("広島県広島市中区", &t));
        assert!(!is_remote_island("", &t));
    }

    #[test]
    fn test_outlying_islands_outside_okinawa() {
        let t = tables();
        for address in [
            "鹿児島県熊毛郡屋久島町安房1",
            "東京都八丈島八丈町大賀郷1",
            "東京都大島町元町1",
            "新潟県佐渡市両津1",
            "香川県小豆郡小豆島町1",
            "長崎県五島市福江町1",
            "長崎県対馬市厳原町1",
            "島根県隠岐郡海士町1",
            "北海道利尻郡利尻町1",
        ] {
            assert!(is_remote_island(address, &t), "{address} should be an island");
        }
    }

    #[test]
    fn test_mainland_island_lookalikes() {
        let t = tables();
        for address in [
            "広島県広島市中区基町1",
            "島根県松江市殿町1",
            "鹿児島県鹿児島市山下町1",
            "徳島県徳島市幸町1",
            "福島県福島市杉妻町1",
            "東京都江東区大島3-1",
            "長崎県長崎市五島町3-3",
            "山口県周南市1",
        ] {
            assert!(!is_remote_island(address, &t), "{address} is on the mainland");
        }
    }

    #[test]
    fn test_address_in_snippet() {
        let t = tables();
        let snippet = "〒900-0001 沖縄県那覇市港町2-1-3 TEL 098-000-0000";
        assert_eq!(
            address_in(snippet, &t.prefectures).as_deref(),
            Some("沖縄県那覇市港町2-1-3")
        );
        assert_eq!(address_in("素敵な宿です", &t.prefectures), None);
    }

    #[test]
    fn test_find_address_first_hit_wins() {
        let t = tables();
        let hits = vec![
            SearchHit::new("https://a.jp").with_description("海が見える宿"),
            SearchHit::new("https://b.jp").with_description("長野県松本市中央１−２"),
            SearchHit::new("https://c.jp").with_description("東京都港区芝5-1"),
        ];
        assert_eq!(
            find_address(&hits, &t.prefectures).as_deref(),
            Some("長野県松本市中央１−２")
        );
    }
}
