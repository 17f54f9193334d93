//! Fixture-based snapshot tests: each `.md` transcript in `tests/fixtures/`
//! is parsed and rendered to text, with the `.snap` colocated next to it.

use replymark_engine::parsing::parse_text;
use replymark_engine::render;

#[test]
fn fixture_chat_reply() {
    assert_fixture("chat_reply");
}

#[test]
fn fixture_headerless_table() {
    assert_fixture("headerless_table");
}

#[test]
fn fixture_truncated_reply() {
    assert_fixture("truncated_reply");
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let md = std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap();

    let blocks = parse_text(&md);
    let rendered = render::to_text(&blocks);

    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(name, rendered);
    });
}
