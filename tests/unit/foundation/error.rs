use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PixeloomError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(PixeloomError::theme("x").to_string().contains("theme error:"));
    assert!(
        PixeloomError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        PixeloomError::Allocation { bytes: 64 }
            .to_string()
            .contains("64 bytes")
    );
}

#[test]
fn encoding_mismatch_names_both_formats() {
    let msg = PixeloomError::encoding(PixelFormat::Indexed, PixelFormat::Rgba).to_string();
    assert!(msg.contains("Indexed"));
    assert!(msg.contains("Rgba"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PixeloomError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
