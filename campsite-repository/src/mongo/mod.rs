//! MongoDB implementation of the `DocumentStore` trait.

mod provider;

pub use provider::MongoStore;
