use modelkit_backend::{CodecError, StoreError};

#[test]
fn store_error_messages() {
    assert_eq!(StoreError::NotFound("a/b".into()).to_string(), "record not found: a/b");
    assert_eq!(StoreError::InvalidKey("".into()).to_string(), "invalid key: ");
    assert_eq!(StoreError::Unavailable("closed".into()).to_string(), "store unavailable: closed");
    assert_eq!(StoreError::Backend("boom".into()).to_string(), "backend error: boom");
}

#[test]
fn store_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: StoreError = io.into();
    assert!(matches!(err, StoreError::Io(_)));
    assert!(err.to_string().starts_with("IO error:"));
}

#[test]
fn only_not_found_is_not_found() {
    assert!(StoreError::NotFound("x".into()).is_not_found());
    assert!(!StoreError::Backend("x".into()).is_not_found());
}

#[test]
fn codec_error_messages() {
    assert_eq!(CodecError::Encode("nan".into()).to_string(), "encode error: nan");
    assert_eq!(CodecError::Decode("eof".into()).to_string(), "decode error: eof");
    assert_eq!(CodecError::Unsupported("blob".into()).to_string(), "unsupported value: blob");
}
