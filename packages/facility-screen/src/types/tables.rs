//! Reference tables driving classification and eligibility.
//!
//! All matching is substring-based. The defaults cover Japanese lodging
//! facilities; any subset can be overridden from JSON, e.g.
//!
//! ```json
//! { "ota_domains": ["jalan.net", "booking.com"], "excluded_prefecture": "北海道" }
//! ```

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReferenceTables {
    /// Booking-platform domains.
    pub ota_domains: Vec<String>,

    /// Social, aggregator and other non-target domains.
    pub excluded_domains: Vec<String>,

    /// Words in a title/snippet that mark a page as the official site.
    pub official_markers: Vec<String>,

    /// Generic lodging-type words removed before name matching.
    pub lodging_words: Vec<String>,

    /// Appended to the facility name, one search per entry, in order.
    pub query_suffixes: Vec<String>,

    /// Prefecture names, matched against addresses.
    pub prefectures: Vec<String>,

    /// Prefecture whose facilities are never targets.
    pub excluded_prefecture: String,

    /// Address keywords identifying remote islands.
    pub island_keywords: Vec<String>,

    /// Free/simple site-builder hosting domains.
    pub simple_site_domains: Vec<String>,

    /// Substrings in a page body that identify a site builder.
    pub builder_fingerprints: Vec<String>,
}

impl ReferenceTables {
    /// Parse overrides from JSON; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self {
            ota_domains: strings(&[
                "jalan.net",
                "rakuten.co.jp",
                "booking.com",
                "agoda.com",
                "ikyu.com",
                "expedia.com",
                "expedia.co.jp",
            ]),
            excluded_domains: strings(&[
                "instagram.com",
                "facebook.com",
                "twitter.com",
                "x.com",
                "ameblo.jp",
                "fc2.com",
                "jimdo.com",
                "wixsite.com",
                "google.com",
                "jal.co.jp",
                "ana.co.jp",
                "japanican.com",
                "relux.com",
                "yadoplace.com",
            ]),
            official_markers: strings(&["公式", "オフィシャル", "official"]),
            lodging_words: strings(&["ペンション", "民宿", "ホテル"]),
            query_suffixes: strings(&["公式サイト", "宿", "ホームページ"]),
            prefectures: strings(&[
                "北海道", "青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県",
                "茨城県", "栃木県", "群馬県", "埼玉県", "千葉県", "東京都", "神奈川県",
                "新潟県", "富山県", "石川県", "福井県", "山梨県", "長野県", "岐阜県",
                "静岡県", "愛知県", "三重県", "滋賀県", "京都府", "大阪府", "兵庫県",
                "奈良県", "和歌山県", "鳥取県", "島根県", "岡山県", "広島県", "山口県",
                "徳島県", "香川県", "愛媛県", "高知県", "福岡県", "佐賀県", "長崎県",
                "熊本県", "大分県", "宮崎県", "鹿児島県", "沖縄県",
            ]),
            excluded_prefecture: "沖縄県".to_string(),
            // No bare "島": it would match 広島県, 島根県, 鹿児島県 and every other
            // prefecture or city with 島 in its name. Islands are listed by name,
            // town or district instead.
            island_keywords: strings(&[
                "離島", "奄美", "沖永良部", "与論", "久米島", "宮古島", "石垣島",
                "西表島", "竹富島", "小浜島", "波照間島", "与那国島", "伊江島",
                "座間味島", "渡嘉敷島", "粟国島", "伊平屋島", "伊是名島", "北大東島",
                "南大東島", "多良間島", "水納島", "古宇利島", "瀬底島", "伊計島",
                "宮城島", "平安座島", "浜比嘉島", "津堅島", "久高島", "奥武島",
                "瀬長島",
                // Outlying islands outside Okinawa
                "屋久島", "種子島", "西之表", "中種子", "南種子", "徳之島", "喜界",
                "八丈", "三宅島", "三宅村", "伊豆大島", "大島町", "新島村", "神津島",
                "御蔵島", "青ヶ島", "小笠原", "佐渡", "隠岐", "対馬", "壱岐",
                "五島市", "上五島", "小値賀", "小豆島", "小豆郡", "直島", "利尻",
                "礼文", "奥尻", "天売", "焼尻", "粟島浦", "答志島", "周防大島",
            ]),
            simple_site_domains: strings(&[
                "wixsite.com",
                "wordpress.com",
                "canva.site",
                "peraichi.com",
                "jimdosite.com",
            ]),
            builder_fingerprints: strings(&[
                "wp-content",
                "wordpress",
                "wixsite.com",
                "wixstatic.com",
                "canva.site",
                "canva.com",
                "peraichi.com",
                "jimdosite.com",
                "jimdo",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_all_prefectures() {
        let tables = ReferenceTables::default();
        assert_eq!(tables.prefectures.len(), 47);
        assert!(tables.prefectures.contains(&tables.excluded_prefecture));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tables =
            ReferenceTables::from_json_str(r#"{"ota_domains": ["jalan.net"]}"#).unwrap();
        assert_eq!(tables.ota_domains, vec!["jalan.net".to_string()]);
        assert_eq!(tables.excluded_prefecture, "沖縄県");
        assert_eq!(tables.query_suffixes.len(), 3);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = ReferenceTables::from_json_str("{ota_domains").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTables(_)));
    }
}
