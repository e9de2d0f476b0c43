use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("fleet of {robots} robots needs {robots} spawn points, layout has {spawns}")]
    InsufficientSpawns { robots: usize, spawns: usize },
}

pub type FleetResult<T> = Result<T, FleetError>;
