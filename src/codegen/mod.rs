pub mod batch;
pub mod client;
pub mod ddl;

use crate::schema::Table;

/// Trait for artifact generators.
///
/// Generators only see tables that already passed validation.
pub trait Generator {
    fn generate(&self, tables: &[Table]) -> syn::Result<String>;
}
