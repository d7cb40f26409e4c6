pub mod rate_limit_middleware;
