use kernel::KernelError;

/// Maps driver-level errors into [`KernelError`] reports.
pub trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}
