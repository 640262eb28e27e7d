mod boundary;
mod config;
mod dashboard;
