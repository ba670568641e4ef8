pub mod aqhi;
