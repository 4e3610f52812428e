/// General error type in the Module System.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Custom error thrown by a module.
    #[error(transparent)]
    ModuleError(#[from] anyhow::Error),
}

impl Error {
    /// Returns the typed module error carried by this error, if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        let Error::ModuleError(err) = self;
        err.downcast_ref::<E>()
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Bech32ParseError {
    #[error("Bech32 error: {0}")]
    Bech32(#[from] bech32::Error),
    #[error("Wrong HRP: {0}")]
    WrongHPR(String),
    #[error("Invalid payload length {0}, should be 32")]
    InvalidLength(usize),
}
