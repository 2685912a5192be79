use facesync_derive::facesync_error;
use std::borrow::Cow;

#[facesync_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<Vec<u8>, DemoError> {
    let bytes = std::fs::read("/definitely/not/here").context("Reading font cache")?;
    Ok(bytes)
}

fn main() {
    let err = read().expect_err("missing file");
    assert!(err.to_string().contains("(Reading font cache)"));

    let internal: DemoError = "boom".into();
    assert_eq!(internal.to_string(), "Internal error: boom");

    let owned: Result<(), DemoError> = Err(String::from("late").into());
    let with_context = owned.context("while binding").expect_err("still an error");
    assert_eq!(with_context.to_string(), "Internal error (while binding): late");
}
