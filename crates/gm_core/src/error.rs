use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("{team} does not field a complete five-role roster")]
    IncompleteRoster { team: String },

    #[error("not enough teams for this stage: need {needed}, have {found}")]
    ShortField { needed: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, SimError>;
