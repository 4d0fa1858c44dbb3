//! Foreground window → owning process name.

use std::path::Path;

use windows::core::PWSTR;
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Threading::{
    OpenProcess, QueryFullProcessImageNameW, PROCESS_NAME_WIN32, PROCESS_QUERY_LIMITED_INFORMATION,
};
use windows::Win32::UI::WindowsAndMessaging::{GetForegroundWindow, GetWindowThreadProcessId};

use screenlapse_core::traits::active_process::ActiveProcessLookup;

/// Reports the executable name (without extension) of the process that owns
/// the foreground window, e.g. `notepad` for `C:\Windows\notepad.exe`.
#[derive(Debug, Default)]
pub struct ForegroundProcess {
    path_buf: Vec<u16>,
}

impl ForegroundProcess {
    pub fn new() -> Self {
        Self {
            path_buf: vec![0u16; 1024],
        }
    }

    fn process_id() -> Option<u32> {
        unsafe {
            let hwnd = GetForegroundWindow();
            if hwnd.is_invalid() {
                return None;
            }
            let mut pid = 0u32;
            GetWindowThreadProcessId(hwnd, Some(&mut pid));
            (pid != 0).then_some(pid)
        }
    }

    fn image_path(&mut self, pid: u32) -> Option<String> {
        if self.path_buf.is_empty() {
            self.path_buf = vec![0u16; 1024];
        }

        unsafe {
            let process = match OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) {
                Ok(handle) => ProcessHandle(handle),
                Err(e) => {
                    log::debug!("OpenProcess({}) failed: {}", pid, e);
                    return None;
                }
            };

            let mut len = self.path_buf.len() as u32;
            if let Err(e) = QueryFullProcessImageNameW(
                process.0,
                PROCESS_NAME_WIN32,
                PWSTR(self.path_buf.as_mut_ptr()),
                &mut len,
            ) {
                log::debug!("QueryFullProcessImageNameW({}) failed: {}", pid, e);
                return None;
            }

            Some(String::from_utf16_lossy(&self.path_buf[..len as usize]))
        }
    }
}

impl ActiveProcessLookup for ForegroundProcess {
    fn current(&mut self) -> Option<String> {
        let pid = Self::process_id()?;
        let path = self.image_path(pid)?;
        Path::new(&path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }
}

struct ProcessHandle(HANDLE);

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}
