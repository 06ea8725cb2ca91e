use std::collections::HashMap;

use pricewatch_core::{DeliveryOptions, LocaleRules};

use super::*;
use crate::error::ErrorKind;

const URL: &str = "https://articulo.mercadolibre.com.ar/MLA-123456789-producto-x";

fn extractor() -> Extractor {
    Extractor::new(SiteProfile::default()).expect("default profile compiles")
}

/// Wraps `head` and `body` fragments into a minimal listing page.
fn page(head: &str, body: &str) -> String {
    format!("<!DOCTYPE html><html><head>{head}</head><body>{body}</body></html>")
}

fn price_meta(content: &str) -> String {
    format!(r#"<meta itemprop="price" content="{content}">"#)
}

fn home_section(text: &str) -> String {
    format!(
        r#"<div class="ui-pdp-container__row ui-pdp-container__row--shipping-summary">
             <div class="ui-pdp-media"><p class="ui-pdp-media__title">{text}</p></div>
           </div>"#
    )
}

fn pickup_section(text: &str) -> String {
    format!(
        r#"<div class="ui-pdp-container__row ui-pdp-container__row--pick-up-summary">
             <p class="ui-pdp-media__title">{text}</p>
           </div>"#
    )
}

// -----------------------------------------------------------------------
// price
// -----------------------------------------------------------------------

#[test]
fn full_listing_scenario() {
    let html = page(
        &format!(
            r#"{}<meta itemprop="priceCurrency" content="ARS"><meta property="og:title" content="Producto X">"#,
            price_meta("45999")
        ),
        &home_section("Llega gratis el 10 de mayo"),
    );

    let record = extractor().extract_html(URL, &html).expect("record");

    assert_eq!(record.url, URL);
    assert_eq!(record.price, 45_999);
    assert_eq!(record.currency, "ARS");
    assert_eq!(record.title, "Producto X");
    assert!(record.available);
    assert!(record.delivery.home.is_free_delivery);
    assert_eq!(record.delivery.home.date.as_deref(), Some("10 de mayo"));
    assert!(record.delivery.home.time_remaining.is_none());
    assert_eq!(record.delivery.pickup, DeliveryOptions::default().pickup);
}

#[test]
fn missing_price_marker_is_product_not_found() {
    let html = page(
        r#"<meta property="og:title" content="Producto X">"#,
        &home_section("Llega gratis el 10 de mayo"),
    );

    let err = extractor().extract_html(URL, &html).unwrap_err();

    assert!(
        matches!(err, ScraperError::ProductNotFound { ref url } if url == URL),
        "expected ProductNotFound, got: {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::ProductNotFound);
    assert!(err.to_string().contains(URL));
}

#[test]
fn empty_page_is_product_not_found() {
    let err = extractor().extract_html(URL, "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ProductNotFound);
}

#[test]
fn non_numeric_price_is_parse_error() {
    let html = page(&price_meta("consultar"), "");
    let err = extractor().extract_html(URL, &html).unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidPrice { ref content, .. } if content == "consultar"),
        "expected InvalidPrice, got: {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::ParseError);
    assert_eq!(err.to_string(), "Invalid price format");
}

#[test]
fn negative_price_is_parse_error() {
    let html = page(&price_meta("-10"), "");
    let err = extractor().extract_html(URL, &html).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseError);
}

#[test]
fn price_marker_without_content_is_parse_error() {
    let html = page(r#"<meta itemprop="price">"#, "");
    let err = extractor().extract_html(URL, &html).unwrap_err();
    assert!(
        matches!(err, ScraperError::MissingPriceContent { .. }),
        "expected MissingPriceContent, got: {err:?}"
    );
    assert_eq!(err.kind(), ErrorKind::ParseError);
}

#[test]
fn decimal_price_is_truncated_to_whole_units() {
    let html = page(&price_meta("45999.50"), "");
    let record = extractor().extract_html(URL, &html).expect("record");
    assert_eq!(record.price, 45_999);
}

#[test]
fn parse_price_cases() {
    assert_eq!(parse_price("45999"), Some(45_999));
    assert_eq!(parse_price(" 120 "), Some(120));
    assert_eq!(parse_price("0"), Some(0));
    assert_eq!(parse_price("10.00"), Some(10));
    assert!(parse_price("").is_none());
    assert!(parse_price("10.").is_none());
    assert!(parse_price(".5").is_none());
    assert!(parse_price("1.234.567").is_none());
    assert!(parse_price("+5").is_none());
    assert!(parse_price("12abc").is_none());
    assert!(parse_price("99999999999999999999999").is_none());
}

#[test]
fn parse_price_rejects_trailing_garbage_after_leading_digits() {
    assert!(parse_price("45999abc").is_none());
    assert!(parse_price("45999.5x").is_none());
    assert!(parse_price(" 12,5").is_none());
    assert!(parse_price("-45999").is_none());
}

// -----------------------------------------------------------------------
// currency, title, availability
// -----------------------------------------------------------------------

#[test]
fn missing_currency_falls_back_to_ars() {
    let html = page(&price_meta("100"), "");
    let record = extractor().extract_html(URL, &html).expect("record");
    assert_eq!(record.currency, "ARS");
}

#[test]
fn empty_currency_content_falls_back() {
    let html = page(
        &format!(r#"{}<meta itemprop="priceCurrency" content="">"#, price_meta("100")),
        "",
    );
    let record = extractor().extract_html(URL, &html).expect("record");
    assert_eq!(record.currency, "ARS");
}

#[test]
fn explicit_currency_is_kept() {
    let html = page(
        &format!(r#"{}<meta itemprop="priceCurrency" content="USD">"#, price_meta("100")),
        "",
    );
    let record = extractor().extract_html(URL, &html).expect("record");
    assert_eq!(record.currency, "USD");
}

#[test]
fn missing_title_is_empty_string() {
    let html = page(&price_meta("100"), "");
    let record = extractor().extract_html(URL, &html).expect("record");
    assert_eq!(record.title, "");
}

#[test]
fn stock_message_marks_listing_unavailable() {
    let html = page(
        &price_meta("100"),
        r#"<p class="ui-pdp-stock-message">¡Última disponible!</p>"#,
    );
    let record = extractor().extract_html(URL, &html).expect("record");
    assert!(!record.available);
}

#[test]
fn empty_stock_message_element_still_marks_unavailable() {
    let html = page(&price_meta("100"), r#"<div class="ui-pdp-stock-message"></div>"#);
    let record = extractor().extract_html(URL, &html).expect("record");
    assert!(!record.available);
}

#[test]
fn listing_without_stock_message_is_available() {
    let html = page(&price_meta("100"), "<p>Stock disponible</p>");
    let record = extractor().extract_html(URL, &html).expect("record");
    assert!(record.available);
}

// -----------------------------------------------------------------------
// home delivery
// -----------------------------------------------------------------------

#[test]
fn missing_home_container_keeps_defaults() {
    let html = page(&price_meta("100"), "<p>Llega gratis el lunes</p>");
    let record = extractor().extract_html(URL, &html).expect("record");
    assert_eq!(record.delivery.home, DeliveryOptions::default().home);
}

#[test]
fn free_keyword_match_is_case_insensitive() {
    let html = page(&price_meta("100"), &home_section("Envío GRATIS a todo el país"));
    let record = extractor().extract_html(URL, &html).expect("record");
    assert!(record.delivery.home.is_free_delivery);
}

#[test]
fn paid_delivery_is_not_free_but_keeps_date() {
    let html = page(&price_meta("100"), &home_section("Llega el martes 14 de mayo, por $ 3.500"));
    let record = extractor().extract_html(URL, &html).expect("record");
    assert!(!record.delivery.home.is_free_delivery);
    assert_eq!(record.delivery.home.date.as_deref(), Some("martes 14 de mayo"));
}

#[test]
fn home_text_without_date_phrase_has_no_date() {
    let html = page(&price_meta("100"), &home_section("Envío a todo país"));
    let record = extractor().extract_html(URL, &html).expect("record");
    assert!(record.delivery.home.date.is_none());
}

#[test]
fn countdown_is_read_from_home_container() {
    let body = r#"<div class="ui-pdp-container__row--shipping-summary">
        <p class="ui-pdp-media__title">Llega gratis mañana</p>
        <span id="MORE_THAN_TWO_HOURS_WITH_MIN"> Comprando dentro de las próximas 3 h 20 min </span>
    </div>"#;
    let html = page(&price_meta("100"), body);
    let record = extractor().extract_html(URL, &html).expect("record");
    assert_eq!(
        record.delivery.home.time_remaining.as_deref(),
        Some("Comprando dentro de las próximas 3 h 20 min")
    );
}

#[test]
fn countdown_outside_home_container_is_ignored() {
    let body = format!(
        r#"{}<span id="MORE_THAN_TWO_HOURS_WITH_MIN">3 h</span>"#,
        home_section("Llega gratis el jueves")
    );
    let html = page(&price_meta("100"), &body);
    let record = extractor().extract_html(URL, &html).expect("record");
    assert!(record.delivery.home.time_remaining.is_none());
}

// -----------------------------------------------------------------------
// pickup
// -----------------------------------------------------------------------

#[test]
fn pickup_range_is_extracted() {
    let html = page(
        &price_meta("100"),
        &pickup_section("Retirá gratis entre el 10 y el 14 de mayo en correo y otros puntos"),
    );
    let record = extractor().extract_html(URL, &html).expect("record");
    assert!(record.delivery.pickup.is_free_delivery);
    assert_eq!(record.delivery.pickup.date.as_deref(), Some("10 y el 14 de mayo"));
    assert!(record.delivery.pickup.time_remaining.is_none());
}

#[test]
fn pickup_without_range_phrase_has_no_date() {
    let html = page(&price_meta("100"), &pickup_section("Retirá en un punto de entrega"));
    let record = extractor().extract_html(URL, &html).expect("record");
    assert!(!record.delivery.pickup.is_free_delivery);
    assert!(record.delivery.pickup.date.is_none());
}

#[test]
fn missing_pickup_container_keeps_defaults() {
    let html = page(&price_meta("100"), &home_section("Llega gratis el 10 de mayo"));
    let record = extractor().extract_html(URL, &html).expect("record");
    assert_eq!(record.delivery.pickup, DeliveryOptions::default().pickup);
}

// -----------------------------------------------------------------------
// determinism and serialization
// -----------------------------------------------------------------------

#[test]
fn repeated_extraction_serializes_identically() {
    let html = page(
        &format!(
            r#"{}<meta itemprop="priceCurrency" content="ARS"><meta property="og:title" content="Producto X">"#,
            price_meta("45999")
        ),
        &format!(
            "{}{}",
            home_section("Llega gratis el 10 de mayo"),
            pickup_section("Retirá entre el 11 y el 12 de mayo en correo")
        ),
    );
    let extractor = extractor();

    let first = serde_json::to_string(&extractor.extract_html(URL, &html).expect("first"))
        .expect("json");
    let second = serde_json::to_string(&extractor.extract_html(URL, &html).expect("second"))
        .expect("json");

    assert_eq!(first, second);
    assert!(
        first.starts_with(r#"{"url":"#),
        "field order changed: {first}"
    );
    assert!(first.contains(r#""home":{"type":"delivery","isFreeDelivery":true,"date":"10 de mayo"}"#));
    assert!(first.contains(r#""pickup":{"type":"pickup","isFreeDelivery":false,"date":"11 y el 12 de mayo"}"#));
}

// -----------------------------------------------------------------------
// profiles
// -----------------------------------------------------------------------

#[test]
fn custom_locale_rules_drive_matching() {
    let profile = SiteProfile {
        locale: LocaleRules {
            free_keyword: "grátis".to_string(),
            home_date_pattern: "em ([^,]+)".to_string(),
            pickup_date_pattern: "entre (.+?) na agência".to_string(),
            fallback_currency: "BRL".to_string(),
        },
        ..SiteProfile::default()
    };
    let extractor = Extractor::new(profile).expect("profile compiles");
    let html = page(&price_meta("250"), &home_section("Chega GRÁTIS em 3 de junho, sábado"));

    let record = extractor.extract_html(URL, &html).expect("record");

    assert_eq!(record.currency, "BRL");
    assert!(record.delivery.home.is_free_delivery);
    assert_eq!(record.delivery.home.date.as_deref(), Some("3 de junho"));
}

#[test]
fn profile_with_invalid_pattern_is_rejected() {
    let mut profile = SiteProfile::default();
    profile.locale.home_date_pattern = "el ([^,]+".to_string();
    let err = Extractor::new(profile).unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidProfile { field: "locale.home_date_pattern", .. }),
        "got: {err:?}"
    );
}

#[test]
fn profile_pattern_without_capture_group_is_rejected() {
    let mut profile = SiteProfile::default();
    profile.locale.pickup_date_pattern = "entre el .+? en correo".to_string();
    let err = Extractor::new(profile).unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidProfile { field: "locale.pickup_date_pattern", .. }),
        "got: {err:?}"
    );
}

#[test]
fn profile_with_empty_free_keyword_is_rejected() {
    let mut profile = SiteProfile::default();
    profile.locale.free_keyword = " ".to_string();
    assert!(Extractor::new(profile).is_err());
}

#[test]
fn profile_with_invalid_marker_is_rejected() {
    let mut profile = SiteProfile::default();
    profile.markers.out_of_stock = "div[[".to_string();
    let err = Extractor::new(profile).unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidProfile { field: "markers.out_of_stock", .. }),
        "got: {err:?}"
    );
}

// -----------------------------------------------------------------------
// alternate locator backend
// -----------------------------------------------------------------------

/// Locator over pre-extracted values, standing in for a different parser.
#[derive(Default)]
struct MapLocator {
    present: Vec<&'static str>,
    attributes: HashMap<(&'static str, &'static str), &'static str>,
    texts: HashMap<(&'static str, &'static str), &'static str>,
}

impl FieldLocator for MapLocator {
    fn exists(&self, marker: &str) -> bool {
        self.present.contains(&marker) || self.attributes.keys().any(|(m, _)| *m == marker)
    }

    fn attribute(&self, marker: &str, attribute: &str) -> Option<String> {
        self.attributes
            .iter()
            .find(|((m, a), _)| *m == marker && *a == attribute)
            .map(|(_, v)| (*v).to_string())
    }

    fn text_within(&self, container: &str, marker: &str) -> Option<String> {
        if !self.exists(container) {
            return None;
        }
        Some(
            self.texts
                .iter()
                .find(|((c, m), _)| *c == container && *m == marker)
                .map(|(_, v)| (*v).to_string())
                .unwrap_or_default(),
        )
    }
}

#[test]
fn extraction_works_against_any_locator() {
    let mut locator = MapLocator::default();
    locator
        .attributes
        .insert((r#"meta[itemprop="price"]"#, "content"), "999");
    locator.present.push(".ui-pdp-container__row--pick-up-summary");
    locator.texts.insert(
        (".ui-pdp-container__row--pick-up-summary", ".ui-pdp-media__title"),
        "Retirá gratis entre el 2 y el 3 de junio en correo",
    );

    let fields = extractor().extract_fields(URL, &locator).expect("fields");

    assert_eq!(fields.price, 999);
    assert!(fields.currency.is_none());
    assert!(fields.available);
    assert!(fields.pickup.is_free_delivery);
    assert_eq!(fields.pickup.date.as_deref(), Some("2 y el 3 de junio"));
    assert!(!fields.home.is_free_delivery);
}
