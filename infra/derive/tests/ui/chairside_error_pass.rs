use chairside_derive::chairside_error;
use std::borrow::Cow;

#[chairside_error]
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

fn read(path: &str) -> Result<String, DemoError> {
    std::fs::read_to_string(path).context("Reading demo file")
}

fn main() {
    let err = read("/definitely/not/here").unwrap_err();
    assert!(err.to_string().contains("(Reading demo file)"));

    let internal: DemoError = "boom".into();
    let tagged: Result<(), DemoError> = Err(internal);
    let tagged = tagged.context("while testing").unwrap_err();
    assert_eq!(tagged.to_string(), "Internal error (while testing): boom");
}
