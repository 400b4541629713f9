#![allow(unsafe_op_in_unsafe_fn)]
//! Look-and-feel plumbing: visual styles, dark-mode preference, frame theming.

use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::Graphics::Dwm::DwmSetWindowAttribute;
use windows_sys::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};
use windows_sys::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, KEY_READ, RegCloseKey, RegOpenKeyExW, RegQueryValueExW,
};
use windows_sys::Win32::UI::Controls::{
    ICC_STANDARD_CLASSES, ICC_WIN95_CLASSES, INITCOMMONCONTROLSEX, InitCommonControlsEx,
    SetWindowTheme,
};

use super::util::to_wstring;
use crate::error::WindowError;

/// Opts the process into native visual styles and the system dark-mode
/// preference. Returns an error when the uxtheme entry point cannot be
/// resolved; callers report that and continue.
pub unsafe fn init_look_and_feel() -> Result<(), WindowError> {
    let iccex = INITCOMMONCONTROLSEX {
        dwSize: std::mem::size_of::<INITCOMMONCONTROLSEX>() as u32,
        dwICC: ICC_WIN95_CLASSES | ICC_STANDARD_CLASSES,
    };
    InitCommonControlsEx(&iccex);

    let uxtheme_name = to_wstring("uxtheme.dll");
    let uxtheme = LoadLibraryW(uxtheme_name.as_ptr());
    if uxtheme.is_null() {
        return Err(WindowError::look_and_feel("uxtheme.dll failed to load"));
    }

    // Ordinal 135: SetPreferredAppMode
    match GetProcAddress(uxtheme, 135 as *const u8) {
        Some(set_preferred_app_mode) => {
            let set_preferred_app_mode: extern "system" fn(i32) -> i32 =
                std::mem::transmute(set_preferred_app_mode);
            set_preferred_app_mode(2); // 2 = AllowDark
            Ok(())
        }
        None => Err(WindowError::look_and_feel(
            "SetPreferredAppMode not exported by uxtheme.dll",
        )),
    }
}

/// Reads the system app-theme preference from the registry.
pub unsafe fn is_system_dark_mode() -> bool {
    let subkey = to_wstring("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize");
    let val_name = to_wstring("AppsUseLightTheme");
    let mut hkey: HKEY = std::ptr::null_mut();

    if RegOpenKeyExW(HKEY_CURRENT_USER, subkey.as_ptr(), 0, KEY_READ, &mut hkey) == 0 {
        let mut data: u32 = 0;
        let mut cb_data = std::mem::size_of::<u32>() as u32;
        let result = RegQueryValueExW(
            hkey,
            val_name.as_ptr(),
            std::ptr::null_mut(),
            std::ptr::null_mut(),
            &mut data as *mut _ as *mut u8,
            &mut cb_data,
        );
        RegCloseKey(hkey);

        if result == 0 {
            return data == 0; // 0 = dark mode, 1 = light mode
        }
    }
    false
}

/// Applies the dark or light title-bar frame to a window.
pub unsafe fn set_window_frame_theme(hwnd: HWND, is_dark: bool) {
    let dark_mode_val: i32 = if is_dark { 1 } else { 0 };
    // DWMWA_USE_IMMERSIVE_DARK_MODE = 20
    let _ = DwmSetWindowAttribute(
        hwnd,
        20,
        &dark_mode_val as *const _ as _,
        std::mem::size_of::<i32>() as u32,
    );
}

/// Themes a scrollable control to match the frame.
pub unsafe fn apply_control_theme(h_ctrl: HWND, is_dark: bool) {
    let sub_app = if is_dark {
        to_wstring("DarkMode_Explorer")
    } else {
        to_wstring("Explorer")
    };
    let _ = SetWindowTheme(h_ctrl, sub_app.as_ptr(), std::ptr::null());
}
