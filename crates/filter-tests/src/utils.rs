#![allow(dead_code)]

use crate::fixtures::{Person, people};
use filter_engine::{
    CompileErrorKind, FilterCompiler, MethodRegistry, Predicate, TokenRegistry,
};
use model::{DataType, Filter, LeafExpression, Operator};

pub fn compile_person(filter: &Filter) -> Predicate<Person> {
    try_compile_person(filter, &TokenRegistry::new(), &MethodRegistry::new())
        .unwrap_or_else(|e| panic!("filter should compile: {e}"))
}

pub fn try_compile_person(
    filter: &Filter,
    tokens: &TokenRegistry,
    methods: &MethodRegistry,
) -> filter_engine::Result<Predicate<Person>> {
    FilterCompiler::default().compile::<Person>(filter, tokens, methods)
}

/// Names of the fixture people accepted by `predicate`, in fixture order.
pub fn matching_names(predicate: &Predicate<Person>) -> Vec<String> {
    people()
        .iter()
        .filter(|p| predicate.evaluate(p))
        .map(|p| p.name.clone())
        .collect()
}

pub fn compile_error_kind(filter: &Filter, tokens: &TokenRegistry) -> CompileErrorKind {
    match try_compile_person(filter, tokens, &MethodRegistry::new()) {
        Ok(predicate) => panic!("expected a compile error, got {predicate}"),
        Err(e) => e.kind,
    }
}

pub fn age(operator: Operator, value: i64) -> LeafExpression {
    LeafExpression::compare("age", operator, DataType::Integer).with_right(value)
}

/// Element filter `element == value` over a string collection.
pub fn element_equals(value: &str) -> Filter {
    Filter::and([LeafExpression::compare("", Operator::Eq, DataType::String).with_right(value)])
}
