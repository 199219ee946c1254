pub mod ambient_field;
