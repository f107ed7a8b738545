mod builder;
mod logical;
