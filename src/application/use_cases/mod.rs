/// Use cases module containing application business logic orchestration
mod load_report;

pub use load_report::{LoadPhase, LoadReportUseCase};
