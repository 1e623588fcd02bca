// Careers form submissions: multipart intake, resume checks, Drive upload, Sheets row.
// External services are reached only through the traits in `gateways`.

pub mod form;
pub mod gateways;
pub mod handlers;
pub mod naming;
pub mod service;
pub mod validation;

#[cfg(test)]
pub mod fakes;
