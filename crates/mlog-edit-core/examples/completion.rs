use mlog_edit_core::Document;
use mlog_edit_lang::{SyntaxConfig, Vocabulary};

const SYNTAX: &str = r#"{
    "special_variables": ["@this", "@counter"],
    "builtin_functions": [
        {"ubind": []},
        {"ucontrol": [{"orders": ["move", "approach", "itemTake"]}]},
        {"print": []}
    ]
}"#;

fn main() {
    let syntax = SyntaxConfig::from_json_str(SYNTAX).unwrap();
    let mut vocab = Vocabulary::with_keywords(syntax.keywords());

    // Words the user already typed become candidates too.
    let doc = Document::from_text("set warehouse cell1\nucontrol itemTake warehouse copper 10");
    vocab.harvest(&doc.get_text());

    // The prefix under the cursor drives the popup.
    let prefix = doc.word_at(23).unwrap();
    assert_eq!(prefix, "ucontrol");
    assert_eq!(vocab.completions("u"), vec!["ubind", "ucontrol"]);
    assert_eq!(vocab.completions("ware"), vec!["warehouse"]);

    println!("completions for 'u': {:?}", vocab.completions("u"));
}
