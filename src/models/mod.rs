mod address_field;
mod dto;
mod parsed_address;

pub use address_field::AddressField;
pub use dto::AddressDto;
pub use parsed_address::ParsedAddress;
