pub mod entities;
pub mod explanation;
pub mod features;
pub mod fuser;
pub mod ports;
pub mod services;
pub mod value_objects;
