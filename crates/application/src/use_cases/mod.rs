pub mod reverse_lookup;

pub use reverse_lookup::ReverseLookupUseCase;
