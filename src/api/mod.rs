pub mod orfr;
