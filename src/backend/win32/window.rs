#![allow(unsafe_op_in_unsafe_fn)]
//! Window class, window procedure, and the EDIT-based output area.

use std::ffi::c_void;
use std::sync::OnceLock;

use windows_sys::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows_sys::Win32::Graphics::Gdi::{
    CLEARTYPE_QUALITY, CLIP_DEFAULT_PRECIS, CreateFontW, CreateSolidBrush, DEFAULT_CHARSET,
    DEFAULT_PITCH, FF_DONTCARE, FW_NORMAL, FillRect, HBRUSH, HDC, HFONT, OUT_DEFAULT_PRECIS,
    SetBkColor, SetTextColor,
};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CREATESTRUCTW, CS_HREDRAW, CS_VREDRAW, CreateWindowExW, DefWindowProcW, DestroyWindow,
    GWLP_USERDATA, GetClientRect, GetSystemMetrics, GetWindowTextLengthW, IDC_ARROW, LoadCursorW,
    PostQuitMessage, RegisterClassW, SM_CXSCREEN, SM_CYSCREEN, SW_SHOW, SWP_NOZORDER,
    SendMessageW, SetWindowLongPtrW, SetWindowPos, ShowWindow, WM_CLOSE, WM_CTLCOLOREDIT,
    WM_CTLCOLORSTATIC, WM_DESTROY, WM_ERASEBKGND, WM_NCCREATE, WM_NCDESTROY, WM_SETFONT, WM_SIZE,
    WNDCLASSW, WS_CAPTION, WS_CHILD, WS_OVERLAPPEDWINDOW, WS_POPUP, WS_SYSMENU, WS_VISIBLE,
    WS_VSCROLL,
};

use super::theme;
use super::util::{get_window_state, to_wstring};
use crate::backend::ClosePolicy;
use crate::error::WindowError;
use crate::options::{OutputAreaOptions, WindowOptions};

const WINDOW_CLASS_NAME: &str = "WinoutWindow";

// Edit-control styles and messages (windows-sys scatters these; declared
// here with the documented values)
const ES_MULTILINE: u32 = 0x0004;
const ES_AUTOVSCROLL: u32 = 0x0040;
const ES_READONLY: u32 = 0x0800;
const EM_SETSEL: u32 = 0x00B1;
const EM_REPLACESEL: u32 = 0x00C2;
const SS_CENTER: u32 = 0x0001;

const POPUP_WIDTH: i32 = 500;
const POPUP_HEIGHT: i32 = 200;

static POPUP_FONT: OnceLock<isize> = OnceLock::new();

/// Per-window state reachable from the window procedure.
struct WinData {
    policy: ClosePolicy,
    bg_brush: HBRUSH,
    /// Text child: the output EDIT control or a popup's STATIC label.
    child: HWND,
    text_fg: COLORREF,
    text_bg: COLORREF,
    text_brush: HBRUSH,
}

fn popup_font() -> HFONT {
    let handle = *POPUP_FONT.get_or_init(|| unsafe {
        let face = to_wstring("Segoe UI");
        CreateFontW(
            -14,
            0,
            0,
            0,
            FW_NORMAL as i32,
            0,
            0,
            0,
            DEFAULT_CHARSET as u32,
            OUT_DEFAULT_PRECIS as u32,
            CLIP_DEFAULT_PRECIS as u32,
            CLEARTYPE_QUALITY as u32,
            (DEFAULT_PITCH | FF_DONTCARE) as u32,
            face.as_ptr(),
        ) as isize
    });
    handle as HFONT
}

unsafe fn register_class() {
    let class_name = to_wstring(WINDOW_CLASS_NAME);
    let wc = WNDCLASSW {
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wnd_proc),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: GetModuleHandleW(std::ptr::null()),
        hIcon: std::ptr::null_mut(),
        hCursor: LoadCursorW(std::ptr::null_mut(), IDC_ARROW),
        // Backgrounds are painted per window in WM_ERASEBKGND
        hbrBackground: std::ptr::null_mut(),
        lpszMenuName: std::ptr::null(),
        lpszClassName: class_name.as_ptr(),
    };
    // Ignore the result: the class may already be registered
    RegisterClassW(&wc);
}

unsafe fn create_window_raw(
    title: &str,
    width: i32,
    height: i32,
    style: u32,
    background: COLORREF,
    policy: ClosePolicy,
) -> Result<HWND, WindowError> {
    register_class();

    let data = Box::new(WinData {
        policy,
        bg_brush: CreateSolidBrush(background),
        child: std::ptr::null_mut(),
        text_fg: 0,
        text_bg: background,
        text_brush: CreateSolidBrush(background),
    });

    // Center on the primary display
    let x = (GetSystemMetrics(SM_CXSCREEN) - width) / 2;
    let y = (GetSystemMetrics(SM_CYSCREEN) - height) / 2;

    let class_name = to_wstring(WINDOW_CLASS_NAME);
    let title_w = to_wstring(title);
    let hwnd = CreateWindowExW(
        0,
        class_name.as_ptr(),
        title_w.as_ptr(),
        style,
        x,
        y,
        width,
        height,
        std::ptr::null_mut(),
        std::ptr::null_mut(),
        GetModuleHandleW(std::ptr::null()),
        Box::into_raw(data) as *mut c_void,
    );

    if hwnd.is_null() {
        return Err(WindowError::creation("CreateWindowExW failed"));
    }

    theme::set_window_frame_theme(hwnd, theme::is_system_dark_mode());
    Ok(hwnd)
}

/// Creates the main window, hidden until shown.
pub unsafe fn create_main_window(
    options: &WindowOptions,
    policy: ClosePolicy,
) -> Result<HWND, WindowError> {
    create_window_raw(
        &options.title,
        options.width,
        options.height,
        WS_OVERLAPPEDWINDOW,
        options.background.to_colorref(),
        policy,
    )
}

/// Makes a window visible. Safe to repeat; Win32 keeps a single window.
pub unsafe fn show_window(hwnd: HWND) {
    ShowWindow(hwnd, SW_SHOW);
}

/// Creates an immediately visible popup window with `body` centered in it.
///
/// The popup owns its window resource; it shares nothing with the main
/// window. It is serviced by whichever message pump runs next.
pub unsafe fn create_popup(title: &str, body: &str, policy: ClosePolicy) {
    let white: COLORREF = 0x00FFFFFF;
    let hwnd = match create_window_raw(
        title,
        POPUP_WIDTH,
        POPUP_HEIGHT,
        WS_POPUP | WS_CAPTION | WS_SYSMENU | WS_VISIBLE,
        white,
        policy,
    ) {
        Ok(hwnd) => hwnd,
        Err(_) => return,
    };

    let mut rect: RECT = std::mem::zeroed();
    GetClientRect(hwnd, &mut rect);

    let static_class = to_wstring("STATIC");
    let body_w = to_wstring(body);
    let label = CreateWindowExW(
        0,
        static_class.as_ptr(),
        body_w.as_ptr(),
        WS_CHILD | WS_VISIBLE | SS_CENTER,
        0,
        (rect.bottom - rect.top) / 3,
        rect.right - rect.left,
        (rect.bottom - rect.top) * 2 / 3,
        hwnd,
        std::ptr::null_mut(),
        GetModuleHandleW(std::ptr::null()),
        std::ptr::null(),
    );
    SendMessageW(label, WM_SETFONT, popup_font() as WPARAM, 1);

    if let Some(data) = get_window_state::<WinData>(hwnd) {
        data.child = label;
    }

    ShowWindow(hwnd, SW_SHOW);
}

/// Creates the read-only, word-wrapped, auto-scrolling output area filling
/// the window's client rectangle.
pub unsafe fn attach_output_area(
    hwnd: HWND,
    options: &OutputAreaOptions,
) -> Result<HWND, WindowError> {
    let mut rect: RECT = std::mem::zeroed();
    GetClientRect(hwnd, &mut rect);

    // Word wrap comes from the absence of ES_AUTOHSCROLL
    let edit_class = to_wstring("EDIT");
    let edit = CreateWindowExW(
        0,
        edit_class.as_ptr(),
        std::ptr::null(),
        WS_CHILD | WS_VISIBLE | WS_VSCROLL | ES_MULTILINE | ES_READONLY | ES_AUTOVSCROLL,
        0,
        0,
        rect.right - rect.left,
        rect.bottom - rect.top,
        hwnd,
        std::ptr::null_mut(),
        GetModuleHandleW(std::ptr::null()),
        std::ptr::null(),
    );
    if edit.is_null() {
        return Err(WindowError::creation("EDIT control creation failed"));
    }

    let face = to_wstring("Consolas");
    let font = CreateFontW(
        -options.font_size,
        0,
        0,
        0,
        FW_NORMAL as i32,
        0,
        0,
        0,
        DEFAULT_CHARSET as u32,
        OUT_DEFAULT_PRECIS as u32,
        CLIP_DEFAULT_PRECIS as u32,
        CLEARTYPE_QUALITY as u32,
        (DEFAULT_PITCH | FF_DONTCARE) as u32,
        face.as_ptr(),
    );
    SendMessageW(edit, WM_SETFONT, font as WPARAM, 1);

    // Dark scrollbar when the area background is dark
    let bg = options.background;
    let is_dark = (bg.r as u32 + bg.g as u32 + bg.b as u32) / 3 < 128;
    theme::apply_control_theme(edit, is_dark);

    if let Some(data) = get_window_state::<WinData>(hwnd) {
        data.child = edit;
        data.text_fg = options.foreground.to_colorref();
        data.text_bg = options.background.to_colorref();
        data.text_brush = CreateSolidBrush(data.text_bg);
    }

    Ok(edit)
}

/// Appends `text` to the output area and scrolls to the latest line.
pub unsafe fn append_text(edit: HWND, text: &str) {
    if edit.is_null() {
        return;
    }

    // Move the caret (and with it the view) to the end
    let len = GetWindowTextLengthW(edit);
    SendMessageW(edit, EM_SETSEL, len as WPARAM, len as LPARAM);

    // EDIT controls want CRLF line breaks
    let crlf = text.replace("\r\n", "\n").replace('\n', "\r\n");
    let text_w = to_wstring(&crlf);
    SendMessageW(edit, EM_REPLACESEL, 0, text_w.as_ptr() as LPARAM);
}

unsafe extern "system" fn wnd_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if msg == WM_NCCREATE {
        let createstruct = &*(lparam as *const CREATESTRUCTW);
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, createstruct.lpCreateParams as isize);
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }

    let Some(data) = get_window_state::<WinData>(hwnd) else {
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    };

    match msg {
        WM_CTLCOLOREDIT | WM_CTLCOLORSTATIC => {
            let hdc = wparam as HDC;
            SetTextColor(hdc, data.text_fg);
            SetBkColor(hdc, data.text_bg);
            data.text_brush as LRESULT
        }
        WM_ERASEBKGND => {
            let hdc = wparam as HDC;
            let mut rc: RECT = std::mem::zeroed();
            GetClientRect(hwnd, &mut rc);
            FillRect(hdc, &rc, data.bg_brush);
            1
        }
        WM_SIZE => {
            if !data.child.is_null() {
                let width = (lparam & 0xFFFF) as i32;
                let height = ((lparam >> 16) & 0xFFFF) as i32;
                SetWindowPos(data.child, std::ptr::null_mut(), 0, 0, width, height, SWP_NOZORDER);
            }
            0
        }
        WM_CLOSE => {
            DestroyWindow(hwnd);
            0
        }
        WM_DESTROY => {
            if data.policy == ClosePolicy::ExitProcess {
                PostQuitMessage(0);
            }
            0
        }
        WM_NCDESTROY => {
            let ptr = data as *mut WinData;
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
            drop(Box::from_raw(ptr));
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
