use digest_core::PreviewRecord;
use digest_engine::{decode_html, ExtractError, Extractor, HabrExtractor, PageLayout};
use pretty_assertions::assert_eq;
use url::Url;

fn base() -> Url {
    Url::parse("https://habr.com/ru/all/").unwrap()
}

const LISTING: &str = r#"
<html><body>
  <article class="tm-articles-list__item">
    <time datetime="2024-05-01T10:00:00.000Z" title="2024-05-01, 13:00">3 часа назад</time>
    <h2 class="tm-title"><a href="/ru/articles/100/" class="tm-title__link"><span>Новый  фреймворк
      на Python</span></a></h2>
    <div class="article-formatted-body"><p>Коротко о <b>главном</b>.</p><script>track()</script></div>
  </article>
  <article class="tm-articles-list__item">
    <h2 class="tm-title"><span>Заголовок без ссылки</span></h2>
  </article>
  <article class="tm-articles-list__item">
    <h2 class="tm-title"><a href="/ru/articles/101/"></a></h2>
  </article>
  <article class="tm-articles-list__item">
    <time datetime="2024-05-01T09:00:00.000Z">вчера</time>
    <h2 class="tm-title"><a href="https://habr.com/ru/news/102/#comments">Погода сегодня</a></h2>
  </article>
</body></html>
"#;

#[test]
fn listing_yields_valid_entries_in_document_order() {
    let previews = HabrExtractor::default().extract_previews(LISTING, &base());

    assert_eq!(
        previews,
        vec![
            PreviewRecord::new(
                "Новый фреймворк на Python",
                "https://habr.com/ru/articles/100/",
                "2024-05-01, 13:00",
                "Коротко о главном.",
            ),
            PreviewRecord::new(
                "Погода сегодня",
                "https://habr.com/ru/news/102/",
                "2024-05-01T09:00:00.000Z",
                "",
            ),
        ]
    );
}

#[test]
fn listing_document_is_lazy_and_single_pass() {
    let extractor = HabrExtractor::default();
    let listing = extractor.listing(LISTING, &base());
    let mut previews = listing.previews();

    assert_eq!(
        previews.next().map(|p| p.url),
        Some("https://habr.com/ru/articles/100/".to_string())
    );
    assert_eq!(
        previews.next().map(|p| p.url),
        Some("https://habr.com/ru/news/102/".to_string())
    );
    assert_eq!(previews.next(), None);
}

#[test]
fn full_text_comes_from_the_article_body() {
    let html = r#"
    <html><body>
      <div class="tm-article-snippet"><p>анонс</p></div>
      <div class="tm-article-body">
        <h3>Design</h3><p>patterns</p>
        <style>.x{}</style>
        <p>Про <a href="/x">web</a>-разработку</p>
      </div>
    </body></html>
    "#;
    let text = HabrExtractor::default().extract_full_text(html).unwrap();
    assert_eq!(text, "Design patterns Про web-разработку");
}

#[test]
fn full_text_falls_back_to_formatted_body() {
    let html = r#"<div class="article-formatted-body">фото <i>дня</i></div>"#;
    let text = HabrExtractor::default().extract_full_text(html).unwrap();
    assert_eq!(text, "фото дня");
}

#[test]
fn missing_container_is_an_extract_error() {
    let err = HabrExtractor::default()
        .extract_full_text("<html><body><p>web</p></body></html>")
        .unwrap_err();
    assert_eq!(err, ExtractError::NoContentContainer);
}

#[test]
fn custom_layout_is_honoured() {
    let layout = PageLayout {
        entry: "li.post".to_string(),
        title_link: "a.headline".to_string(),
        preview: "p.lead".to_string(),
        date: "span.date".to_string(),
        content: vec!["main".to_string()],
    };
    let extractor = HabrExtractor::new(&layout).unwrap();
    let html = r#"<ul><li class="post"><span class="date">May 1</span>
        <a class="headline" href="posts/1">Hello</a><p class="lead">Lead</p></li></ul>"#;

    let previews = extractor.extract_previews(html, &Url::parse("https://blog.test/index/").unwrap());
    assert_eq!(
        previews,
        vec![PreviewRecord::new("Hello", "https://blog.test/index/posts/1", "May 1", "Lead")]
    );
    assert_eq!(extractor.extract_full_text("<main>body</main>").unwrap(), "body");
}

#[test]
fn invalid_selector_is_reported() {
    let layout = PageLayout {
        entry: "article[".to_string(),
        ..PageLayout::default()
    };
    let err = HabrExtractor::new(&layout).unwrap_err();
    assert!(matches!(err, ExtractError::InvalidSelector { selector, .. } if selector == "article["));
}

#[test]
fn decode_respects_charset_header() {
    let bytes = b"caf\xe9"; // iso-8859-1
    let decoded = decode_html(bytes, Some("text/html; charset=ISO-8859-1")).unwrap();
    assert_eq!(decoded.html, "café");
    assert!(
        decoded.encoding_label.eq_ignore_ascii_case("ISO-8859-1")
            || decoded.encoding_label.eq_ignore_ascii_case("windows-1252")
    );
}

#[test]
fn decode_handles_utf8_bom() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_html(bytes, Some("text/html")).unwrap();
    assert_eq!(decoded.html, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn decode_uses_meta_charset_without_header() {
    let mut bytes = b"<html><head><meta charset=\"windows-1251\"></head><body>".to_vec();
    bytes.extend_from_slice(b"\xE4\xE8\xE7\xE0\xE9\xED</body></html>");
    let decoded = decode_html(&bytes, None).unwrap();
    assert!(decoded.html.contains("дизайн"));
}
