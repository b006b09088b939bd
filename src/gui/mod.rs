mod file_picker;

pub use file_picker::{DialogPicker, FilePicker, InputKind, PresetPicker};
