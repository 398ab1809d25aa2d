use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Name too short: need at least {min} characters after trimming")]
    NameTooShort { min: usize },
}
