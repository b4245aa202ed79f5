use std::process::Termination;

pub mod list_districts;
pub mod list_regions;
pub mod render_page;
pub mod search;
pub mod selection;
pub mod view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Ok = 0,
    FaultOrArgsError = 1,
    RequestUnsatisfied = 2,
}

impl Termination for ExitCode {
    fn report(self) -> std::process::ExitCode {
        std::process::ExitCode::from(self as u8)
    }
}
