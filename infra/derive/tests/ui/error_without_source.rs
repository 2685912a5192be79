use facesync_derive::facesync_error;
use std::borrow::Cow;

#[facesync_error]
#[derive(Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Invalid field{}: {field}", format_context(.context))]
    Invalid { field: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unknown name: {name}")]
    Unknown { name: String },
}

fn main() {
    let err: Result<(), FieldError> = Err(FieldError::Invalid { field: "uri".into(), context: None });
    let err = err.context("Ubuntu").expect_err("invalid");
    assert_eq!(err.to_string(), "Invalid field (Ubuntu): uri");

    let unknown = FieldError::Unknown { name: "Roboto".to_owned() };
    assert_eq!(unknown.clone(), unknown);
}
