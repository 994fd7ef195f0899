use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FinderError {
    #[error("Invalid format. Please enter valid Jeep Code(s).")]
    InvalidFormat { input: String },
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Invalid route code {route_code:?} in route table")]
    InvalidRouteCode { route_code: String },

    #[error("Stop sequence {stop_sequence} appears more than once on Route {route_code:?}")]
    DuplicateStopSequence {
        route_code: String,
        stop_sequence: u32,
    },

    #[error("Failed to read route table: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Finder(#[from] FinderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
