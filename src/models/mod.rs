pub mod invoice;

pub use invoice::{
    output_object_name, GcsFileTestRequest, ProcessInvoiceRequest, ProcessInvoiceResponse,
};
