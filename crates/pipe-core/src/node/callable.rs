use crate::model::{Outputs, ParamSpec, ResolvedParams};

/// Error reportado por un callable. El motor no lo interpreta: lo envuelve
/// en `PipeError::ExecutionFailure` y aborta la corrida (stop-on-failure).
pub type CallError = Box<dyn std::error::Error + Send + Sync>;

/// Trait que define un callable adaptable. Implementaciones deben ser puras
/// respecto a sus parámetros resueltos; cualquier otro efecto es asunto del
/// callable, no del motor.
pub trait Callable: Send {
    /// Nombre declarado del callable. Identidad por defecto del nodo.
    fn name(&self) -> &str;

    /// Firma declarada: lista ordenada de parámetros con default opcional.
    /// El orden es semántico (direccionamiento posicional del cableado).
    fn signature(&self) -> Vec<ParamSpec>;

    /// Aridad declarada de salida: cantidad fija de outputs que produce.
    fn output_arity(&self) -> usize {
        1
    }

    /// Ejecución con los parámetros resueltos, en orden de declaración.
    fn call(&self, params: &ResolvedParams) -> Result<Outputs, CallError>;
}

/// Adaptador de closures a `Callable`, para construir nodos sin declarar un
/// tipo por callable.
///
/// ```
/// use pipe_core::{FnCallable, Outputs, ParamSpec};
/// use serde_json::json;
///
/// let double = FnCallable::new("double", vec![ParamSpec::with_default("x", json!(0))], |p| {
///     Ok(Outputs::single(json!(p.as_i64("x")? * 2)))
/// });
/// ```
pub struct FnCallable {
    name: String,
    signature: Vec<ParamSpec>,
    arity: usize,
    func: Box<dyn Fn(&ResolvedParams) -> Result<Outputs, CallError> + Send + Sync>,
}

impl FnCallable {
    pub fn new<F, O>(name: impl Into<String>, signature: Vec<ParamSpec>, func: F) -> Self
        where F: Fn(&ResolvedParams) -> Result<O, CallError> + Send + Sync + 'static,
              O: Into<Outputs>
    {
        Self { name: name.into(),
               signature,
               arity: 1,
               func: Box::new(move |p| func(p).map(Into::into)) }
    }

    /// Declara una aridad de salida distinta de 1.
    pub fn with_output_arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }
}

impl Callable for FnCallable {
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> Vec<ParamSpec> {
        self.signature.clone()
    }

    fn output_arity(&self) -> usize {
        self.arity
    }

    fn call(&self, params: &ResolvedParams) -> Result<Outputs, CallError> {
        (self.func)(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fn_callable_exposes_declared_signature() {
        let c = FnCallable::new("sum",
                                vec![ParamSpec::with_default("a", json!(1)), ParamSpec::required("b")],
                                |p| Ok(Outputs::single(json!(p.as_i64("a")? + p.as_i64("b")?))));
        assert_eq!(c.name(), "sum");
        assert_eq!(c.output_arity(), 1);
        let sig = c.signature();
        assert_eq!(sig[0].name, "a");
        assert_eq!(sig[1].default, None);

        let params = ResolvedParams::from_pairs(vec![("a".to_string(), json!(2)), ("b".to_string(), json!(3))]);
        let out = c.call(&params).expect("sum should run");
        assert_eq!(out.values(), &[json!(5)]);
    }
}
