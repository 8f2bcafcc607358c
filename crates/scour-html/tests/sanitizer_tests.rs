//! Integration tests for the whitelist sanitizer.

use scour_common::warning::warning_count;
use scour_common::{MalformedInputError, SanitizationLevel, Severity, WhitelistConfig};
use scour_html::{ClassificationConfig, HtmlSanitizer, MarkupTokenizer, Token, sanitize_html};

/// Helper to sanitize at level 2 with the default policy.
fn clean(markup: &str) -> (String, Severity) {
    clean_with(markup, &WhitelistConfig::default())
}

fn clean_with(markup: &str, policy: &WhitelistConfig) -> (String, Severity) {
    let result = sanitize_html(markup, SanitizationLevel::MarkupAndStyles, policy, false).unwrap();
    (result.markup, result.severity)
}

#[test_log::test]
fn test_script_is_discarded_with_its_body() {
    let (markup, severity) = clean("<script>alert(1)</script>");
    assert_eq!(markup, "");
    assert_eq!(severity, Severity::RawContentDiscarded);
}

#[test]
fn test_raw_content_is_discarded_even_when_tag_is_allowed() {
    let policy = WhitelistConfig::default().with_tags(["p", "object"]);
    let (markup, severity) = clean_with("<p>a</p><object>b</object>", &policy);
    assert_eq!(markup, "<p>a</p><object>");
    assert_eq!(severity, Severity::RawContentDiscarded);
}

#[test]
fn test_disallowed_attribute_is_dropped() {
    let policy = WhitelistConfig::default().with_attributes(["src"]);
    let (markup, severity) = clean_with("<img src=\"http://x/a.png\" onclick=\"evil()\">", &policy);
    assert_eq!(markup, "<img src=\"http://x/a.png\"/>");
    assert_eq!(severity, Severity::Filtered);
}

#[test]
fn test_disallowed_scheme_is_dropped() {
    let (markup, severity) = clean("<a href=\"javascript:alert(1)\">x</a>");
    assert_eq!(markup, "<a>x</a>");
    assert_eq!(severity, Severity::Filtered);
}

#[test]
fn test_allowed_scheme_is_kept() {
    let (markup, severity) = clean("<a href=\"https://x\">x</a>");
    assert_eq!(markup, "<a href=\"https://x\">x</a>");
    assert_eq!(severity, Severity::Cosmetic);
}

#[test]
fn test_relative_urls_are_kept() {
    let (markup, severity) = clean("<a href=\"/docs/a:b\">x</a><img src=\"pic.png\">");
    assert_eq!(markup, "<a href=\"/docs/a:b\">x</a><img src=\"pic.png\"/>");
    assert_eq!(severity, Severity::Cosmetic);
}

#[test]
fn test_obfuscated_schemes_are_dropped() {
    let inputs = [
        "<a href=\"java\tscript:alert(1)\">x</a>",
        "<a href=\" \u{200B}javascript:alert(1)\">x</a>",
        "<a href=\"java&#x09;script:alert(1)\">x</a>",
        "<a href=\"&#106;avascript:alert(1)\">x</a>",
        "<a href=\"javascript&colon;alert(1)\">x</a>",
        "<a href=\"JAVASCRIPT:alert(1)\">x</a>",
        "<a href='vbscript:msgbox'>x</a>",
    ];

    for input in inputs {
        let (markup, severity) = clean(input);
        assert_eq!(markup, "<a>x</a>", "scheme survived in {input:?}");
        assert_eq!(severity, Severity::Filtered);
    }
}

#[test]
fn test_invisible_characters_are_removed_from_urls() {
    let (markup, severity) = clean("<a href=\"http://x/\u{200B}a b\">x</a>");
    assert_eq!(markup, "<a href=\"http://x/ab\">x</a>");
    assert_eq!(severity, Severity::Cosmetic);
}

#[test]
fn test_disallowed_container_is_unwrapped() {
    let (markup, severity) = clean("<div><blink>b<i>c</i></blink></div>");
    assert_eq!(markup, "<div>b<i>c</i></div>");
    assert_eq!(severity, Severity::Filtered);
}

#[test]
fn test_comments_are_removed() {
    let (markup, severity) = clean("a<!-- secret -->b");
    assert_eq!(markup, "ab");
    assert_eq!(severity, Severity::Cosmetic);
}

#[test]
fn test_unclosed_elements_are_closed() {
    let (markup, severity) = clean("<p>Hi<b>there");
    assert_eq!(markup, "<p>Hi<b>there</b></p>");
    assert_eq!(severity, Severity::Cosmetic);
}

#[test]
fn test_empty_attributes_are_omitted() {
    let (markup, severity) = clean("<p title=\"\" class=x>t</p>");
    assert_eq!(markup, "<p class=\"x\">t</p>");
    assert_eq!(severity, Severity::Cosmetic);
}

#[test]
fn test_quotes_cannot_escape_attribute_values() {
    let (markup, _) = clean("<b title='say \"hi\" onmouseover=x'>t</b>");
    assert_eq!(
        markup,
        "<b title=\"say &quot;hi&quot; onmouseover=x\">t</b>"
    );
}

#[test]
fn test_style_is_cleaned_at_level_two() {
    let (markup, severity) = clean("<span style=\"color: blue; behavior: url(x.htc)\">t</span>");
    assert_eq!(markup, "<span style=\"color:blue;\">t</span>");
    assert_eq!(severity, Severity::Filtered);
}

#[test]
fn test_fully_rejected_style_is_omitted() {
    let (markup, severity) = clean("<span style=\"behavior: none\">t</span>");
    assert_eq!(markup, "<span>t</span>");
    assert_eq!(severity, Severity::Filtered);
}

#[test]
fn test_style_is_an_ordinary_attribute_at_level_one() {
    let result = sanitize_html(
        "<span style=\"color: red\" onclick=\"x\">t</span>",
        SanitizationLevel::Markup,
        &WhitelistConfig::default(),
        false,
    )
    .unwrap();
    assert_eq!(result.markup, "<span style=\"color: red\">t</span>");
    assert_eq!(result.severity, Severity::Filtered);
}

#[test]
fn test_style_is_cleaned_without_an_attribute_whitelist_entry() {
    let policy = WhitelistConfig::default().with_attributes(["title"]);
    let (markup, severity) = clean_with("<b style=\"color: red\" title=\"t\">x</b>", &policy);
    assert_eq!(markup, "<b style=\"color:red;\" title=\"t\">x</b>");
    assert_eq!(severity, Severity::Cosmetic);

    let policy = WhitelistConfig::default().with_attributes(Vec::<String>::new());
    let (markup, severity) = clean_with("<span style=\"color:blue\">t</span>", &policy);
    assert_eq!(markup, "<span style=\"color:blue;\">t</span>");
    assert_eq!(severity, Severity::Cosmetic);
}

#[test]
fn test_style_is_dropped_at_level_one_when_not_whitelisted() {
    let policy = WhitelistConfig::default().with_attributes(["title"]);
    let result = sanitize_html(
        "<b style=\"color: red\" title=\"t\">x</b>",
        SanitizationLevel::Markup,
        &policy,
        false,
    )
    .unwrap();
    assert_eq!(result.markup, "<b title=\"t\">x</b>");
    assert_eq!(result.severity, Severity::Filtered);
}

#[test]
fn test_rejected_styles_and_tags_share_one_warning_each() {
    for i in 0..500 {
        let (markup, severity) = clean(&format!("<b style=\"x{i}: a@b\">t</b><blink{i}>u"));
        assert_eq!(markup, "<b>t</b>u");
        assert_eq!(severity, Severity::Filtered);
    }
    // Every warning the sanitizer raises uses a fixed message.
    assert!(warning_count() <= 2, "{} warnings retained", warning_count());
}

#[test]
fn test_malformed_style_is_dropped_unless_strict() {
    let input = "<b style=\"width: expression(alert(1))\">x</b>";

    let (markup, severity) = clean(input);
    assert_eq!(markup, "<b>x</b>");
    assert_eq!(severity, Severity::Filtered);

    let strict = sanitize_html(
        input,
        SanitizationLevel::MarkupAndStyles,
        &WhitelistConfig::default(),
        true,
    );
    assert!(matches!(
        strict,
        Err(MalformedInputError::DisallowedCharacters(_))
    ));
}

#[test]
fn test_pass_through_levels() {
    let input = "<script>alert(1)</script><b onclick=x>";
    for level in [SanitizationLevel::Off, SanitizationLevel::Disabled] {
        let result = sanitize_html(input, level, &WhitelistConfig::default(), false).unwrap();
        assert_eq!(result.markup, input);
        assert_eq!(result.severity, Severity::Cosmetic);
    }
}

#[test]
fn test_severity_is_the_highest_contribution() {
    let (_, severity) = clean("<b onclick=x>a</b><script>x</script><blink>b</blink>");
    assert_eq!(severity, Severity::RawContentDiscarded);

    let (_, severity) = clean("<b onclick=x>a</b>");
    assert_eq!(severity, Severity::Filtered);
}

#[test]
fn test_custom_classification() {
    let policy = WhitelistConfig::default();
    let classification = ClassificationConfig::default().with_raw_content(["script"]);
    let result = HtmlSanitizer::new(&policy)
        .with_classification(&classification)
        .sanitize("<form><b>x</b></form>")
        .unwrap();
    assert_eq!(result.markup, "<b>x</b>");
    assert_eq!(result.severity, Severity::Filtered);
}

#[test]
fn test_sanitizing_twice_changes_nothing() {
    let inputs = [
        "<p>Hi<b>there</p>",
        "<img src=\"http://x/a.png\" onclick=\"evil()\">",
        "a < b > c",
        "<span style=\"COLOR: Blue; margin: 0 auto\">t</span>",
        "<b title='say \"hi\"'>x</b>",
        "<ul><li>a<li>b</ul>",
        "<script>x</script><blink>y",
        "<A HREF=\"HTTP://X\">x",
        "<table><tr><td>1<td>2</table>",
        "<br/><hr noshade>",
    ];

    for input in inputs {
        let (once, _) = clean(input);
        let (twice, _) = clean(&once);
        assert_eq!(once, twice, "not idempotent for {input:?}");
    }
}

#[test]
fn test_output_only_contains_whitelisted_names() {
    let policy = WhitelistConfig::default()
        .with_tags(["p", "b", "a", "img"])
        .with_attributes(["href", "src", "title"]);
    let input = "<div id=x><p class=c onclick=y>a<b style='color:red'>b</b>\
                 <a href=http://x target=_blank>l</a><img src=y.png width=1>\
                 <iframe src=http://e></iframe><p/ title=t></div>";

    let markup = sanitize_html(input, SanitizationLevel::Markup, &policy, false)
        .unwrap()
        .markup;
    let tokens = MarkupTokenizer::new(&markup, ClassificationConfig::default_tables())
        .run()
        .unwrap();

    for token in tokens {
        match token {
            Token::StartTag {
                name, attributes, ..
            } => {
                assert!(policy.allows_tag(&name), "tag {name} leaked into {markup:?}");
                for attribute in attributes {
                    assert!(
                        policy.allows_attribute(&attribute.name),
                        "attribute {} leaked into {markup:?}",
                        attribute.name
                    );
                }
            }
            Token::EndTag { name } => assert!(policy.allows_tag(&name)),
            _ => {}
        }
    }
}
