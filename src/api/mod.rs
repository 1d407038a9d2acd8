pub mod coinapi;
