pub mod grid;
pub mod tensor_extensions;
