//! Win32 helper functions shared across the backend.

use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GWLP_USERDATA, GetMessageW, GetWindowLongPtrW, MSG, TranslateMessage,
};

/// Convert a Rust string to a null-terminated UTF-16 vector.
pub fn to_wstring(value: &str) -> Vec<u16> {
    value.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Safely retrieves a mutable reference to window state from GWLP_USERDATA.
#[inline]
pub unsafe fn get_window_state<'a, T>(hwnd: HWND) -> Option<&'a mut T> {
    unsafe {
        let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA);
        if ptr == 0 { None } else { Some(&mut *(ptr as *mut T)) }
    }
}

/// Runs the standard Windows message loop until WM_QUIT.
///
/// # Safety
/// This function calls unsafe Win32 APIs.
pub unsafe fn run_message_loop() {
    let mut msg: MSG = unsafe { std::mem::zeroed() };
    // Crucial: check strictly > 0. GetMessage returns -1 on error!
    while unsafe { GetMessageW(&mut msg, std::ptr::null_mut(), 0, 0) } > 0 {
        unsafe {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}
