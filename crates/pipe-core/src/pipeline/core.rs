//! Core `Pipe` implementation: registro ordenado, cableado y corrida
//! secuencial con resolución perezosa de referencias.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::PipeError;
use crate::model::ParamValue;
use crate::node::Node;

/// Conexión registrada: la salida `output` del proveedor alimenta el slot
/// posicional `slot` del suscriptor. Se conserva para que cada corrida
/// re-marque y re-resuelva las referencias diferidas.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Wire {
    provider: String,
    output: usize,
    subscriber: String,
    slot: usize,
}

/// Registro ordenado y de claves únicas de nodos.
///
/// El orden de inserción define el orden de ejecución y es la disciplina de
/// cableado: un proveedor solo puede alimentar a un suscriptor posterior
/// (lineal, sin ciclos ni referencias hacia adelante). El `Pipe` es dueño
/// exclusivo de sus nodos; instancias independientes no comparten estado,
/// pensadas para repartirse entre procesos trabajadores.
pub struct Pipe {
    pub(crate) nodes: IndexMap<String, Node>,
    wires: Vec<Wire>,
    /// Con `true` se emite una línea de progreso antes de ejecutar cada
    /// nodo; no afecta los resultados.
    pub verbose: bool,
}

impl Pipe {
    pub fn new() -> Self {
        Self { nodes: IndexMap::new(),
               wires: Vec::new(),
               verbose: false }
    }

    /// Crea un pipeline sembrado con una lista inicial de nodos.
    pub fn with_nodes(nodes: Vec<Node>) -> Self {
        let mut pipe = Self::new();
        pipe.add_all(nodes);
        pipe
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Agrega un nodo (o cualquier callable adaptable) al final del
    /// registro y devuelve la identidad asignada. Una colisión de identidad
    /// se desambigua con sufijos `_0`, `_1`, ... hasta quedar única.
    pub fn add(&mut self, node: impl Into<Node>) -> String {
        let mut node = node.into();
        let identity = self.disambiguate(node.identity());
        node.set_identity(identity.clone());
        self.nodes.insert(identity.clone(), node);
        identity
    }

    /// Agrega una lista de nodos en orden. Lista vacía es un no-op.
    pub fn add_all(&mut self, nodes: Vec<Node>) -> Vec<String> {
        nodes.into_iter().map(|n| self.add(n)).collect()
    }

    fn disambiguate(&self, identity: &str) -> String {
        if !self.nodes.contains_key(identity) {
            return identity.to_string();
        }
        let mut n = 0;
        loop {
            let candidate = format!("{identity}_{n}");
            if !self.nodes.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Busca un nodo registrado bajo esa identidad.
    pub fn get(&self, identity: &str) -> Result<&Node, PipeError> {
        self.nodes
            .get(identity)
            .ok_or_else(|| PipeError::UnknownIdentity(identity.to_string()))
    }

    pub fn get_mut(&mut self, identity: &str) -> Result<&mut Node, PipeError> {
        self.nodes
            .get_mut(identity)
            .ok_or_else(|| PipeError::UnknownIdentity(identity.to_string()))
    }

    /// Renombra un nodo preservando su posición en el registro. Las
    /// conexiones y marcadores que referencian la identidad vieja se
    /// reescriben para mantener el cableado funcional.
    pub fn rename(&mut self, new_identity: &str, old_identity: &str) -> Result<(), PipeError> {
        if self.nodes.contains_key(new_identity) {
            return Err(PipeError::DuplicateIdentity(new_identity.to_string()));
        }
        let index = self.nodes
                        .get_index_of(old_identity)
                        .ok_or_else(|| PipeError::UnknownIdentity(old_identity.to_string()))?;

        let mut node = match self.nodes.shift_remove(old_identity) {
            Some(node) => node,
            None => return Err(PipeError::UnknownIdentity(old_identity.to_string())),
        };
        node.set_identity(new_identity.to_string());
        self.nodes.shift_insert(index, new_identity.to_string(), node);

        for wire in &mut self.wires {
            if wire.provider == old_identity {
                wire.provider = new_identity.to_string();
            }
            if wire.subscriber == old_identity {
                wire.subscriber = new_identity.to_string();
            }
        }
        for (_, node) in self.nodes.iter_mut() {
            for (_, value) in node.params_mut() {
                if let ParamValue::Pending { provider, .. } = value {
                    if provider == old_identity {
                        *provider = new_identity.to_string();
                    }
                }
            }
        }
        Ok(())
    }

    /// Cablea la salida `output` del proveedor al slot posicional `slot`
    /// del suscriptor. El suscriptor debe ir estrictamente después del
    /// proveedor en el registro. El efecto es un marcador diferido en la
    /// tabla del suscriptor; la resolución ocurre recién en `run`.
    pub fn connect(&mut self,
                   provider: &str,
                   subscriber: &str,
                   output: usize,
                   slot: usize)
                   -> Result<(), PipeError> {
        let provider_index = self.nodes
                                 .get_index_of(provider)
                                 .ok_or_else(|| PipeError::UnknownIdentity(provider.to_string()))?;
        let subscriber_index = self.nodes
                                   .get_index_of(subscriber)
                                   .ok_or_else(|| PipeError::UnknownIdentity(subscriber.to_string()))?;
        if subscriber_index <= provider_index {
            return Err(PipeError::OrderingViolation { provider: provider.to_string(),
                                                      subscriber: subscriber.to_string() });
        }

        let provider_node = self.get(provider)?;
        if output >= provider_node.output_arity() {
            return Err(PipeError::OutputOutOfRange { provider: provider.to_string(), output });
        }
        let slot_name = self.get(subscriber)?.slot_name(slot)?;

        // A lo sumo una conexión por slot: la última gana.
        self.wires
            .retain(|w| !(w.subscriber == subscriber && w.slot == slot));
        self.wires.push(Wire { provider: provider.to_string(),
                               output,
                               subscriber: subscriber.to_string(),
                               slot });

        self.get_mut(subscriber)?
            .set_raw(&slot_name, ParamValue::Pending { provider: provider.to_string(), output })
    }

    /// Azúcar para cadenas lineales: agrega el nodo al final y cablea la
    /// primera salida del último nodo previo a su primer slot.
    pub fn then(&mut self, node: impl Into<Node>) -> Result<String, PipeError> {
        let node = node.into();
        let provider = match self.nodes.keys().last() {
            Some(key) => key.clone(),
            None => return Err(PipeError::InvalidOperand("cannot chain onto an empty pipeline".to_string())),
        };
        if node.params().is_empty() {
            return Err(PipeError::InvalidOperand(format!("node '{}' declares no parameter to wire",
                                                         node.identity())));
        }
        let identity = self.add(node);
        self.connect(&provider, &identity, 0, 0)?;
        Ok(identity)
    }

    /// Ejecuta los nodos en orden de registro.
    ///
    /// Cada corrida re-aplica las conexiones registradas y resuelve cada
    /// marcador inmediatamente antes de ejecutar su nodo (perezoso, nodo a
    /// nodo): se busca `result.values[output]` del proveedor ya ejecutado y
    /// se sobrescribe el parámetro con el valor concreto. El primer fallo
    /// aborta la corrida; los nodos previos conservan su resultado y los
    /// posteriores quedan sin ejecutar.
    pub fn run(&mut self) -> Result<(), PipeError> {
        self.rearm_wires()?;

        for index in 0..self.nodes.len() {
            let pending: Vec<(String, String, usize)> = match self.nodes.get_index(index) {
                Some((_, node)) => node.params()
                                       .iter()
                                       .filter_map(|(name, value)| match value {
                                           ParamValue::Pending { provider, output } => {
                                               Some((name.clone(), provider.clone(), *output))
                                           }
                                           ParamValue::Concrete(_) => None,
                                       })
                                       .collect(),
                None => break,
            };

            for (param, provider, output) in pending {
                let resolved = self.resolve_reference(&provider, output, index, &param)?;
                if let Some((_, node)) = self.nodes.get_index_mut(index) {
                    node.set_raw(&param, ParamValue::Concrete(resolved))?;
                }
            }

            if let Some((_, node)) = self.nodes.get_index_mut(index) {
                if self.verbose {
                    println!("Executing:\n{node}");
                }
                node.execute()?;
            }
        }
        Ok(())
    }

    /// Resuelve una referencia diferida contra el resultado del proveedor.
    /// El invariante de orden garantiza que el proveedor ya ejecutó.
    fn resolve_reference(&self,
                         provider: &str,
                         output: usize,
                         subscriber_index: usize,
                         param: &str)
                         -> Result<Value, PipeError> {
        let provider_node = self.get(provider)?;
        if !provider_node.result().executed {
            let subscriber = self.nodes
                                 .get_index(subscriber_index)
                                 .map(|(k, _)| k.clone())
                                 .unwrap_or_default();
            return Err(PipeError::UnresolvedReference { node: subscriber, param: param.to_string() });
        }
        provider_node.result()
                     .values
                     .get(output)
                     .cloned()
                     .ok_or_else(|| PipeError::OutputOutOfRange { provider: provider.to_string(), output })
    }

    /// Restaura los marcadores diferidos a partir de las conexiones
    /// registradas, para que una corrida nueva re-resuelva en lugar de
    /// reutilizar valores concretos viejos.
    fn rearm_wires(&mut self) -> Result<(), PipeError> {
        let wires = self.wires.clone();
        for wire in wires {
            let slot_name = self.get(&wire.subscriber)?.slot_name(wire.slot)?;
            self.get_mut(&wire.subscriber)?
                .set_raw(&slot_name, ParamValue::Pending { provider: wire.provider.clone(),
                                                           output: wire.output })?;
        }
        Ok(())
    }
}

impl Default for Pipe {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
         .field("nodes", &self.nodes)
         .field("wires", &self.wires)
         .field("verbose", &self.verbose)
         .finish()
    }
}

impl fmt::Display for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "This pipeline has the following functions:")?;
        for (identity, node) in &self.nodes {
            writeln!(f, "\nFunction id: {identity}")?;
            writeln!(f, "{node}")?;
        }
        Ok(())
    }
}
