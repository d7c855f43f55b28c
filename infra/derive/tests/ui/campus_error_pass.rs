use campus_derive::campus_error;
use std::borrow::Cow;

#[campus_error]
pub enum LoaderError {
    #[error("Read failed{}: {source}", format_context(.context))]
    Read {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing key{}: {key}", format_context(.context))]
    Missing { key: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn load() -> Result<(), LoaderError> {
    Err(std::io::Error::other("disk")).context("reading seed file")?;
    Ok(())
}

fn main() {
    let _ = load();
    let _: LoaderError = "boom".into();
}
