use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::invalid_input_type("text/plain")
            .to_string()
            .contains("invalid input type:")
    );
    assert!(ReelError::parse("x").to_string().contains("parse error:"));
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ReelError::render("x").to_string().contains("render error:"));
    assert!(ReelError::export("x").to_string().contains("export error:"));
}

#[test]
fn invalid_input_type_names_the_declared_type() {
    let err = ReelError::invalid_input_type("image/png");
    assert!(err.to_string().contains("image/png"));
    assert!(matches!(err, ReelError::InvalidInputType { .. }));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
