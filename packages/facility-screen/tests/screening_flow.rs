//! End-to-end screening through the public API, with mock collaborators.

use facility_screen::{
    testing::{MockLookupProvider, MockPageFetcher},
    BatchRunner, BatchSummary, EvidenceExtractor, FacilityRecord, ReasonCode, ReferenceTables,
    ScreenConfig, ScreenMode, SearchHit,
};
use std::sync::Arc;
use std::time::Duration;

fn fast_config(mode: ScreenMode) -> ScreenConfig {
    ScreenConfig {
        mode,
        call_delay: Duration::from_millis(1),
        call_timeout: Duration::from_millis(150),
        ..Default::default()
    }
}

fn runner(
    provider: MockLookupProvider,
    fetcher: MockPageFetcher,
) -> BatchRunner<MockLookupProvider, MockPageFetcher> {
    BatchRunner::new(
        provider,
        fetcher,
        Arc::new(ReferenceTables::default()),
        fast_config(ScreenMode::Eligibility),
    )
    .unwrap()
}

#[test]
fn test_ota_only_hit_has_no_official_site() {
    let extractor = EvidenceExtractor::new(Arc::new(ReferenceTables::default()));
    let result = extractor.extract(&[SearchHit::new("https://booking.com/x")], "やしろ旅館");

    assert_eq!(result.official_site, None);
    assert_eq!(result.ota_joined("; "), "https://booking.com/x");
}

#[test]
fn test_official_marker_in_title_accepts_site() {
    let extractor = EvidenceExtractor::new(Arc::new(ReferenceTables::default()));
    let hits = [SearchHit::new("https://yashoro-ryokan.jp").with_title("やしろ旅館 公式サイト")];
    let result = extractor.extract(&hits, "やしろ旅館");

    assert_eq!(
        result.official_site.as_deref(),
        Some("https://yashoro-ryokan.jp")
    );
}

#[tokio::test]
async fn test_okinawa_is_excluded_whatever_the_site() {
    let provider = MockLookupProvider::new().with_hits(
        "美ら海ホテル 公式サイト",
        vec![SearchHit::new("https://example.com").with_title("美ら海ホテル 公式")],
    );
    let fetcher = MockPageFetcher::new();
    let facility = FacilityRecord::new("美ら海ホテル").with_address("沖縄県那覇市松山1-1");

    let outcome = runner(provider, fetcher.clone()).run(&[facility], |_| {}).await;
    let verdict = outcome[0].verdict.as_ref().unwrap();

    assert!(!verdict.is_target);
    assert_eq!(verdict.reason, ReasonCode::ExcludedPrefecture);
    assert_eq!(verdict.reason.as_str(), "excluded prefecture");
    assert_eq!(
        outcome[0].sites.official_site.as_deref(),
        Some("https://example.com")
    );
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn test_no_site_in_tokyo_is_target() {
    let facility = FacilityRecord::new("やしろ旅館").with_address("東京都渋谷区神南1-2-3");
    let outcome = runner(MockLookupProvider::new(), MockPageFetcher::new())
        .run(&[facility], |_| {})
        .await;
    let verdict = outcome[0].verdict.as_ref().unwrap();

    assert!(verdict.is_target);
    assert_eq!(verdict.reason, ReasonCode::NoOfficialSite);
    assert_eq!(verdict.prefecture, "東京都");
}

#[tokio::test]
async fn test_every_lookup_timing_out_still_yields_verdict() {
    let provider = MockLookupProvider::new()
        .with_hits(
            "やしろ旅館 公式サイト",
            vec![SearchHit::new("https://yashiro.jp").with_title("公式")],
        )
        .with_delay(Duration::from_secs(1));

    let outcome = runner(provider.clone(), MockPageFetcher::new())
        .run(&[FacilityRecord::new("やしろ旅館")], |_| {})
        .await;

    assert_eq!(provider.queries().len(), 3);
    assert!(outcome[0].error.is_none());
    assert_eq!(outcome[0].sites.official_site, None);
    assert!(outcome[0].sites.ota_sites.is_empty());
    let verdict = outcome[0].verdict.as_ref().unwrap();
    assert!(verdict.is_target);
    assert_eq!(verdict.reason, ReasonCode::NoOfficialSite);
}

#[tokio::test]
async fn test_mixed_batch_summary() {
    let provider = MockLookupProvider::new()
        .with_hits(
            "森のペンション 公式サイト",
            vec![
                SearchHit::new("https://www.jalan.net/yad100/"),
                SearchHit::new("https://mori-pension.jimdosite.com/").with_title("森のペンション 公式"),
            ],
        )
        .with_hits(
            "湖畔ホテル 公式サイト",
            vec![SearchHit::new("https://kohan-hotel.jp/").with_title("湖畔ホテル【公式】")],
        )
        .with_hits(
            "民宿しまかぜ 宿",
            vec![SearchHit::new("https://travel.rakuten.co.jp/HOTEL/1/")],
        );
    let fetcher = MockPageFetcher::new()
        .with_page("https://kohan-hotel.jp/", "<html><body>湖畔ホテル</body></html>");

    let facilities = vec![
        FacilityRecord::new("森のペンション").with_address("長野県北佐久郡軽井沢町1-1"),
        FacilityRecord::new("湖畔ホテル").with_address("山梨県南都留郡富士河口湖町2-2"),
        FacilityRecord::new("民宿しまかぜ").with_address("鹿児島県大島郡与論町茶花3"),
        FacilityRecord::new(""),
    ];

    let outcome = runner(provider, fetcher).run(&facilities, |_| {}).await;
    let reasons: Vec<_> = outcome
        .iter()
        .map(|row| row.verdict.as_ref().map(|v| v.reason))
        .collect();

    assert_eq!(
        reasons,
        vec![
            Some(ReasonCode::LowQualitySite),
            Some(ReasonCode::AdequateOfficialSite),
            Some(ReasonCode::RemoteIsland),
            Some(ReasonCode::Unknown),
        ]
    );

    let summary = BatchSummary::from_outcome(&outcome);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.with_official_site, 2);
    assert_eq!(summary.with_ota_listing, 2);
    assert_eq!(summary.without_any_site, 1);
    assert_eq!(summary.targets, 1);
    assert_eq!(summary.non_targets, 3);
}
