use std::sync::Once;

use digest_core::{
    decide, format_report_line, resolve_full_text, Decision, KeywordSet, MatchOutcome,
    MatchResult, PreviewRecord, VisitedSet,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(digest_logging::initialize_for_tests);
}

fn record(title: &str, url: &str, preview: &str) -> PreviewRecord {
    PreviewRecord::new(title, url, "сегодня в 10:00", preview)
}

#[test]
fn preview_match_is_terminal() {
    init_logging();
    let keywords = KeywordSet::standard();
    let visited = VisitedSet::new();
    let article = record("Новый фреймворк на Python", "https://habr.test/a", "");

    let decision = decide(&article, &keywords, &visited);

    assert_eq!(decision, Decision::MatchedInPreview);
    assert_eq!(decision.outcome(), Some(MatchOutcome::MatchedInPreview));
}

#[test]
fn preview_match_wins_even_when_already_visited() {
    init_logging();
    let keywords = KeywordSet::standard();
    let mut visited = VisitedSet::new();
    visited.mark("https://habr.test/b");
    let article = record("Погода сегодня", "https://habr.test/b", "без фото");

    assert_eq!(decide(&article, &keywords, &visited), Decision::MatchedInPreview);
}

#[test]
fn unmatched_preview_needs_full_check_once() {
    init_logging();
    let keywords = KeywordSet::standard();
    let mut visited = VisitedSet::new();
    let article = record("Погода сегодня", "https://habr.test/c", "ясно");

    let first = decide(&article, &keywords, &visited);
    assert_eq!(first, Decision::FetchArticle);
    assert_eq!(first.outcome(), None);

    visited.mark(article.url.clone());
    let second = decide(&article, &keywords, &visited);
    assert_eq!(second, Decision::AlreadyVisited);
    assert_eq!(second.outcome(), Some(MatchOutcome::NoMatch));
}

#[test]
fn full_text_tier_produces_marked_line() {
    init_logging();
    let keywords = KeywordSet::standard();
    let article = record("Погода сегодня", "https://habr.test/d", "ясно");

    let outcome = resolve_full_text("Разбираем Web-стандарты и архитектуру.", &keywords);
    assert_eq!(outcome, MatchOutcome::MatchedInFullText);

    let line = format_report_line(&MatchResult::new(article, outcome)).unwrap();
    assert_eq!(
        line,
        "сегодня в 10:00 — Погода сегодня — https://habr.test/d (найдено в полном тексте)"
    );
    assert_eq!(resolve_full_text("Ничего интересного", &keywords), MatchOutcome::NoMatch);
}
