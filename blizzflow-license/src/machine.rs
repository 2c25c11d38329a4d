//! Machine identity for license binding.
//!
//! Derives a stable fingerprint for the current machine from a processor
//! identifier and the primary disk serial number, hashed into a single
//! SHA-256 digest. Both identifiers come from OS query facilities, so the
//! source is abstracted behind a trait for deterministic testing.

use crate::error::{LicenseError, LicenseResult};
use sha2::{Digest, Sha256};

/// Source of the hardware fingerprint used to bind licenses to a machine.
///
/// Implementations return 64 lowercase hex characters (a SHA-256 digest)
/// or [`LicenseError::IdentityUnavailable`]. The codec never queries
/// hardware itself; it goes through this seam.
pub trait MachineIdentity: Send + Sync {
    /// Returns the fingerprint digest for the current machine.
    fn fingerprint(&self) -> LicenseResult<String>;
}

/// Production identity source backed by OS utilities.
///
/// Every call re-queries the platform; nothing is cached. Queries block on
/// external process invocation, so callers on latency-sensitive threads
/// should generate and validate elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardwareIdentity;

impl MachineIdentity for HardwareIdentity {
    fn fingerprint(&self) -> LicenseResult<String> {
        let cpu_id = processor_id()?;
        let disk_serial = disk_serial()?;

        let mut hasher = Sha256::new();
        hasher.update(cpu_id.as_bytes());
        hasher.update(disk_serial.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

/// Runs `program args..` and returns the first non-empty line of stdout,
/// skipping `skip_lines` leading lines (wmic prints a column header first).
#[cfg(any(target_os = "windows", target_os = "linux", target_os = "macos"))]
fn query_line(program: &str, args: &[&str], skip_lines: usize) -> LicenseResult<String> {
    let output = std::process::Command::new(program)
        .args(args)
        .output()
        .map_err(|e| LicenseError::IdentityUnavailable(format!("{program}: {e}")))?;

    if !output.status.success() {
        return Err(LicenseError::IdentityUnavailable(format!(
            "{program} exited with {}",
            output.status
        )));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .skip(skip_lines)
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            LicenseError::IdentityUnavailable(format!("{program} returned no usable output"))
        })
}

#[cfg(target_os = "windows")]
fn processor_id() -> LicenseResult<String> {
    query_line("wmic", &["cpu", "get", "ProcessorId"], 1)
}

#[cfg(target_os = "windows")]
fn disk_serial() -> LicenseResult<String> {
    query_line("wmic", &["diskdrive", "get", "SerialNumber"], 1)
}

#[cfg(target_os = "linux")]
fn processor_id() -> LicenseResult<String> {
    let cpuinfo = std::fs::read_to_string("/proc/cpuinfo")
        .map_err(|e| LicenseError::IdentityUnavailable(format!("/proc/cpuinfo: {e}")))?;

    cpuinfo
        .lines()
        .find(|line| line.starts_with("Serial") || line.starts_with("model name"))
        .and_then(|line| line.split(':').nth(1))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            LicenseError::IdentityUnavailable("no processor identifier in /proc/cpuinfo".into())
        })
}

#[cfg(target_os = "linux")]
fn disk_serial() -> LicenseResult<String> {
    query_line("lsblk", &["--nodeps", "--noheadings", "-o", "SERIAL"], 0)
}

#[cfg(target_os = "macos")]
fn processor_id() -> LicenseResult<String> {
    query_line("sysctl", &["-n", "machdep.cpu.brand_string"], 0)
}

#[cfg(target_os = "macos")]
fn disk_serial() -> LicenseResult<String> {
    // IOPlatformSerialNumber stands in for a raw disk serial on macOS.
    let output = std::process::Command::new("ioreg")
        .args(["-rd1", "-c", "IOPlatformExpertDevice"])
        .output()
        .map_err(|e| LicenseError::IdentityUnavailable(format!("ioreg: {e}")))?;

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .find(|line| line.contains("IOPlatformSerialNumber"))
        .and_then(|line| line.split('"').nth(3))
        .map(String::from)
        .ok_or_else(|| LicenseError::IdentityUnavailable("IOPlatformSerialNumber not found".into()))
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
fn processor_id() -> LicenseResult<String> {
    Err(LicenseError::IdentityUnavailable(
        "unsupported platform".into(),
    ))
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
fn disk_serial() -> LicenseResult<String> {
    Err(LicenseError::IdentityUnavailable(
        "unsupported platform".into(),
    ))
}
