pub mod a001_farmer_detail;
