//! The command assembler: turns a [`LogoRequest`] into one draw script.
//!
//! Ordering is fixed: shape fragment first, text fragment second, so the text
//! always renders on top of the shape.

use crate::{
    error::LogosmithResult,
    model::{LogoRequest, Shape},
    shapes::graphic_context,
};

/// Assemble the full draw script for a request.
///
/// Fails only if the request's shape name is unknown; callers that already
/// hold a resolved [`Shape`] can rely on this never erroring.
pub fn assemble_script(req: &LogoRequest) -> LogosmithResult<String> {
    let shape = req.shape()?;

    let mut script = String::new();
    if shape != Shape::None {
        script.push_str(&shape.fragment(&req.color, req.scale));
    }
    if !req.text.is_empty() {
        script.push_str(&text_fragment(req));
    }
    Ok(script)
}

/// The text-overlay fragment: font size, fill, a one-unit black outline, a
/// faint undercolor, then the label itself at the requested anchor.
fn text_fragment(req: &LogoRequest) -> String {
    graphic_context(&[
        format!("font-size {}", req.font_size),
        format!("fill {}", req.text_color),
        "stroke black".to_string(),
        "stroke-width 1".to_string(),
        "text-undercolor rgba(0,0,0,0.1)".to_string(),
        format!(
            "text {},{} '{}'",
            req.text_x,
            req.text_y,
            escape_text(&req.text)
        ),
    ])
}

/// Escape free-form text for embedding in a single-quoted draw-script
/// literal.
///
/// Backslashes and single quotes are backslash-escaped so the input can
/// neither terminate the literal nor splice in extra directives; control
/// characters (including newlines) become spaces because the script format is
/// line-oriented.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(shape: &str, text: &str) -> LogoRequest {
        LogoRequest {
            shape: shape.to_string(),
            text: text.to_string(),
            ..LogoRequest::default()
        }
    }

    #[test]
    fn none_shape_and_empty_text_yield_empty_script() {
        assert_eq!(assemble_script(&req("none", "")).unwrap(), "");
    }

    #[test]
    fn none_shape_with_text_yields_exactly_one_text_fragment() {
        let script = assemble_script(&req("none", "Acme")).unwrap();
        assert_eq!(script.matches("push graphic-context").count(), 1);
        assert_eq!(script.matches("pop graphic-context").count(), 1);
        assert!(script.contains("text 150,350 'Acme'"));
        // No shape primitives sneak in.
        for directive in ["line ", "polygon ", "circle ", "roundrectangle "] {
            assert!(!script.contains(directive), "unexpected {directive:?}");
        }
    }

    #[test]
    fn text_fragment_carries_request_fields() {
        let mut r = req("none", "Hi");
        r.text_color = "gold".to_string();
        r.font_size = 48;
        r.text_x = 10;
        r.text_y = 20;
        let script = assemble_script(&r).unwrap();
        assert!(script.contains("font-size 48"));
        assert!(script.contains("fill gold"));
        assert!(script.contains("stroke black"));
        assert!(script.contains("stroke-width 1"));
        assert!(script.contains("text-undercolor rgba(0,0,0,0.1)"));
        assert!(script.contains("text 10,20 'Hi'"));
    }

    #[test]
    fn shape_fragment_precedes_text_fragment() {
        let script = assemble_script(&req("chair", "Acme")).unwrap();
        let shape_at = script.find("stroke-linecap round").unwrap();
        let text_at = script.find("text 150,350").unwrap();
        assert!(shape_at < text_at);
        assert_eq!(script.matches("push graphic-context").count(), 2);
    }

    #[test]
    fn shape_without_text_has_no_text_directive() {
        let script = assemble_script(&req("house", "")).unwrap();
        assert!(!script.contains("text "));
        assert!(!script.contains("font-size"));
    }

    #[test]
    fn unknown_shape_is_rejected_before_assembly() {
        assert!(assemble_script(&req("triangle", "Acme")).is_err());
    }

    #[test]
    fn quotes_and_backslashes_cannot_escape_the_literal() {
        assert_eq!(escape_text(r"it's"), r"it\'s");
        assert_eq!(escape_text(r"a\b"), r"a\\b");
        // The quoted literal stays balanced even for hostile input.
        let script = assemble_script(&req("none", "x' pop graphic-context")).unwrap();
        assert!(script.contains(r"text 150,350 'x\' pop graphic-context'"));
    }

    #[test]
    fn control_characters_become_spaces() {
        assert_eq!(escape_text("a\nb\tc\r"), "a b c ");
        let script = assemble_script(&req("none", "a\nfill red")).unwrap();
        assert!(script.contains("'a fill red'"));
    }

    #[test]
    fn escape_is_a_noop_on_plain_text() {
        assert_eq!(escape_text("Acme Logo 42"), "Acme Logo 42");
    }
}
