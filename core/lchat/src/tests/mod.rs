mod http_exchange_tests;
mod run_app_tests;
