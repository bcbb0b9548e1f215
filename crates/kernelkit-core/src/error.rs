//! Error types for kernelkit.
//!
//! Two layers live here. [`ComputeError`] mirrors the error codes a GPU
//! compute runtime leaves in its last-error register; its `Display` output is
//! the runtime's own description text. [`KernelKitError`] covers everything
//! else the crates can fail on (configuration, missing backends).

use thiserror::Error;

/// Description rendered for a clean register.
pub const NO_ERROR_DESCRIPTION: &str = "no error";

/// Result type for compute-runtime calls.
pub type ComputeResult<T> = std::result::Result<T, ComputeError>;

/// Result type for kernelkit operations.
pub type Result<T> = std::result::Result<T, KernelKitError>;

/// An error code reported by a GPU compute runtime.
///
/// Variant codes follow the CUDA runtime's `cudaError_t` numbering so that a
/// hardware register and the emulated one render identically. Named variants
/// display the text `cudaGetErrorString` returns for their code; any other
/// code keeps the runtime's text in [`ComputeError::Other`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    /// One or more parameters were out of range.
    #[error("invalid argument")]
    InvalidValue,

    /// The runtime could not allocate enough memory.
    #[error("out of memory")]
    MemoryAllocation,

    /// The runtime failed to initialize.
    #[error("initialization error")]
    InitializationError,

    /// Launch grid or block shape is not valid for the device.
    #[error("invalid configuration argument")]
    InvalidConfiguration,

    /// The requested kernel does not exist for this device.
    #[error("invalid device function")]
    InvalidDeviceFunction,

    /// No compute-capable device is present.
    #[error("no CUDA-capable device is detected")]
    NoDevice,

    /// Device ordinal does not name a device.
    #[error("invalid device ordinal")]
    InvalidDevice,

    /// A kernel accessed memory it does not own.
    #[error("an illegal memory access was encountered")]
    IllegalAddress,

    /// The launch asked for more registers or shared memory than available.
    #[error("too many resources requested for launch")]
    LaunchOutOfResources,

    /// The kernel ran past the watchdog deadline.
    #[error("the launch timed out and was terminated")]
    LaunchTimeout,

    /// The kernel faulted during execution.
    #[error("unspecified launch failure")]
    LaunchFailure,

    /// The runtime reported an unknown internal error.
    #[error("unknown error")]
    Unknown,

    /// Any other code, carrying the runtime's own description text.
    #[error("{message}")]
    Other {
        /// Raw runtime error code.
        code: i32,
        /// Runtime-provided description.
        message: String,
    },
}

impl ComputeError {
    /// Runtime error code for this error.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            ComputeError::InvalidValue => 1,
            ComputeError::MemoryAllocation => 2,
            ComputeError::InitializationError => 3,
            ComputeError::InvalidConfiguration => 9,
            ComputeError::InvalidDeviceFunction => 98,
            ComputeError::NoDevice => 100,
            ComputeError::InvalidDevice => 101,
            ComputeError::IllegalAddress => 700,
            ComputeError::LaunchOutOfResources => 701,
            ComputeError::LaunchTimeout => 702,
            ComputeError::LaunchFailure => 719,
            ComputeError::Unknown => 999,
            ComputeError::Other { code, .. } => *code,
        }
    }

    /// Build an error from a raw runtime code.
    ///
    /// Returns `None` for code 0 (success). Named codes render their canonical
    /// runtime text and ignore `message`, so equal codes compare equal no matter
    /// which runtime version produced them. Codes without a named variant keep
    /// `message` as their description.
    #[must_use]
    pub fn from_code(code: i32, message: impl Into<String>) -> Option<Self> {
        let err = match code {
            0 => return None,
            1 => ComputeError::InvalidValue,
            2 => ComputeError::MemoryAllocation,
            3 => ComputeError::InitializationError,
            9 => ComputeError::InvalidConfiguration,
            98 => ComputeError::InvalidDeviceFunction,
            100 => ComputeError::NoDevice,
            101 => ComputeError::InvalidDevice,
            700 => ComputeError::IllegalAddress,
            701 => ComputeError::LaunchOutOfResources,
            702 => ComputeError::LaunchTimeout,
            719 => ComputeError::LaunchFailure,
            999 => ComputeError::Unknown,
            code => ComputeError::Other {
                code,
                message: message.into(),
            },
        };
        Some(err)
    }
}

/// Render a runtime status the way the runtime's error-string lookup does.
#[must_use]
pub fn describe(status: &ComputeResult<()>) -> String {
    match status {
        Ok(()) => NO_ERROR_DESCRIPTION.to_string(),
        Err(e) => e.to_string(),
    }
}

/// Errors raised by kernelkit itself.
#[derive(Error, Debug)]
pub enum KernelKitError {
    /// Configuration could not be parsed or is out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The requested backend is not compiled in or not present.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend failed while answering a query.
    #[error("Backend error: {0}")]
    Backend(String),

    /// A compute runtime call failed.
    #[error("Compute error: {0}")]
    Compute(#[from] ComputeError),
}

impl From<toml::de::Error> for KernelKitError {
    fn from(e: toml::de::Error) -> Self {
        KernelKitError::Config(e.to_string())
    }
}
