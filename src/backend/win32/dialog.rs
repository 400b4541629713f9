#![allow(unsafe_op_in_unsafe_fn)]
//! Modal file/folder selection over the native `IFileOpenDialog`.

use std::path::PathBuf;

use super::com::*;
use super::util::to_wstring;
use crate::backend::{SelectionMode, SelectionRequest};
use crate::error::WindowError;

/// Runs the picker described by `request`, blocking until the user responds.
///
/// Dismissal maps to [`WindowError::SelectionCancelled`]; every other failed
/// HRESULT maps to [`WindowError::DialogFailed`].
pub unsafe fn select_path(request: &SelectionRequest) -> Result<PathBuf, WindowError> {
    let mut p_dialog: *mut c_void = std::ptr::null_mut();
    let hr = CoCreateInstance(
        &CLSID_FILE_OPEN_DIALOG,
        std::ptr::null_mut(),
        CLSCTX_ALL,
        &IID_IFILE_OPEN_DIALOG,
        &mut p_dialog,
    );
    if hr != 0 {
        return Err(WindowError::DialogFailed { hresult: hr });
    }

    let dialog = p_dialog as *mut *mut IFileOpenDialogVtbl;
    let vtbl = (*dialog).as_ref().unwrap();

    let mut options = 0;
    (vtbl.get_options)(p_dialog, &mut options);
    options |= FOS_FORCEFILESYSTEM;
    if request.mode == SelectionMode::FoldersOnly {
        options |= FOS_PICKFOLDERS;
    }
    (vtbl.set_options)(p_dialog, options);

    let title = to_wstring(&request.title);
    (vtbl.set_title)(p_dialog, title.as_ptr());
    let label = to_wstring(&request.confirm_label);
    (vtbl.set_ok_button_label)(p_dialog, label.as_ptr());

    // Root the dialog at the requested directory when it resolves
    if let Some(dir) = request.start_dir.to_str().filter(|d| !d.is_empty()) {
        let dir_w = to_wstring(dir);
        let mut p_folder: *mut c_void = std::ptr::null_mut();
        if SHCreateItemFromParsingName(dir_w.as_ptr(), std::ptr::null_mut(), &IID_ISHELL_ITEM, &mut p_folder) == 0 {
            (vtbl.set_folder)(p_dialog, p_folder);
            release_item(p_folder);
        }
    }

    let hr = (vtbl.show)(p_dialog, 0);
    if hr != 0 {
        (vtbl.release)(p_dialog);
        return if hr == HRESULT_CANCELLED {
            Err(WindowError::SelectionCancelled)
        } else {
            Err(WindowError::DialogFailed { hresult: hr })
        };
    }

    let mut p_item: *mut c_void = std::ptr::null_mut();
    let hr = (vtbl.get_result)(p_dialog, &mut p_item);
    if hr != 0 {
        (vtbl.release)(p_dialog);
        return Err(WindowError::DialogFailed { hresult: hr });
    }

    let path = path_from_item(p_item);
    release_item(p_item);
    (vtbl.release)(p_dialog);

    path.map(PathBuf::from)
        .ok_or(WindowError::DialogFailed { hresult: -1 })
}

/// Extracts the filesystem path from an `IShellItem`, freeing the COM string.
unsafe fn path_from_item(p_item: *mut c_void) -> Option<String> {
    let item = p_item as *mut *mut IShellItemVtbl;
    let item_vtbl = (*item).as_ref().unwrap();

    let mut name_ptr: PCWSTR = std::ptr::null();
    if (item_vtbl.get_display_name)(p_item, SIGDN_FILESYSPATH, &mut name_ptr) == 0
        && !name_ptr.is_null()
    {
        let len = (0..).take_while(|&i| *name_ptr.offset(i) != 0).count();
        let slice = std::slice::from_raw_parts(name_ptr, len);
        let result = String::from_utf16(slice).ok();
        CoTaskMemFree(name_ptr as *mut _);
        return result;
    }
    None
}

unsafe fn release_item(p_item: *mut c_void) {
    let item = p_item as *mut *mut IShellItemVtbl;
    let item_vtbl = (*item).as_ref().unwrap();
    (item_vtbl.release)(p_item);
}
