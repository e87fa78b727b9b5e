pub mod tba_api;
