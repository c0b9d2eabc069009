use crate::model::Shape;

/// Replace every non-alphanumeric character with an underscore.
///
/// Alphanumeric means the Unicode definition, so accented letters survive;
/// path separators, dots, and whitespace do not. The result never contains a
/// path component, which is what makes [`logo_filename`] safe to join onto
/// the output directory.
pub fn sanitize_component(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// The deterministic output basename for a request.
///
/// Two requests whose text sanitizes to the same string and that share a
/// shape write to the same file; the later one wins. That overwrite is
/// intentional, no uniqueness is promised.
pub fn logo_filename(text: &str, shape: Shape) -> String {
    format!("logo_{}_{}.png", sanitize_component(text), shape.name())
}
