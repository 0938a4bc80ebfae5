use thiserror::Error;

/// Unrecoverable CPU conditions surfaced to the host.
///
/// Real hardware hard-locks on these inputs. Once one is raised the CPU
/// keeps returning it from every `step` until it is reset.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuError {
    #[error("illegal opcode {opcode:#04X} at {pc:#06X}")]
    IllegalOpcode { opcode: u8, pc: u16 },
    #[error("unsupported prefix byte {prefix:#04X} at {pc:#06X}")]
    ForeignPrefix { prefix: u8, pc: u16 },
}

impl CpuError {
    /// Address of the offending byte.
    pub fn pc(&self) -> u16 {
        match *self {
            CpuError::IllegalOpcode { pc, .. } | CpuError::ForeignPrefix { pc, .. } => pc,
        }
    }
}
