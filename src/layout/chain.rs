//! Traversal of `Next`-linked native lists.
//!
//! Every node type exposes its `Next` link through [`Linked`]. [`walk`] turns
//! a head pointer into an iterator that stops exactly at the first null link.
//! A node address seen twice is reported as [`ChainError::Cycle`] and ends
//! the iteration, so traversal terminates even over a corrupted block.

use std::collections::HashSet;
use std::marker::PhantomData;

use thiserror::Error;

use super::{
    IpAdapterAddresses, IpAdapterAnycastAddress, IpAdapterDnsServerAddress, IpAdapterDnsSuffix,
    IpAdapterGatewayAddress, IpAdapterMulticastAddress, IpAdapterPrefix, IpAdapterUnicastAddress,
    IpAdapterWinsServerAddress,
};

/// Error raised while walking a native list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// A `Next` link pointed back at a node that was already visited.
    #[error("cycle detected in {list} list after {position} node(s)")]
    Cycle {
        /// Which list was being walked (for diagnostics).
        list: &'static str,
        /// Number of distinct nodes visited before the repeat.
        position: usize,
    },
}

/// A node of a singly linked native list.
pub trait Linked {
    /// Returns the raw `Next` link; null terminates the list.
    fn next_ptr(&self) -> *const Self;
}

macro_rules! impl_linked {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Linked for $ty {
                fn next_ptr(&self) -> *const Self {
                    self.next
                }
            }
        )+
    };
}

impl_linked!(
    IpAdapterAddresses,
    IpAdapterUnicastAddress,
    IpAdapterAnycastAddress,
    IpAdapterMulticastAddress,
    IpAdapterDnsServerAddress,
    IpAdapterPrefix,
    IpAdapterWinsServerAddress,
    IpAdapterGatewayAddress,
    IpAdapterDnsSuffix,
);

/// Iterator over the nodes of a native list. Created by [`walk`].
#[derive(Debug)]
pub struct Chain<'a, T> {
    current: *const T,
    visited: HashSet<usize>,
    list: &'static str,
    done: bool,
    _block: PhantomData<&'a T>,
}

/// Walks a `Next`-linked list starting at `head`.
///
/// `list` names the list in [`ChainError::Cycle`] reports.
///
/// # Safety
///
/// `head` must be null or point to a valid `T`, and every non-null `Next`
/// link reachable from it must also point to a valid `T`. All nodes must
/// outlive `'a`.
pub unsafe fn walk<'a, T: Linked>(head: *const T, list: &'static str) -> Chain<'a, T> {
    Chain {
        current: head,
        visited: HashSet::new(),
        list,
        done: false,
        _block: PhantomData,
    }
}

impl<'a, T: Linked> Iterator for Chain<'a, T> {
    type Item = Result<&'a T, ChainError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.current.is_null() {
            return None;
        }

        if !self.visited.insert(self.current.addr()) {
            self.done = true;
            return Some(Err(ChainError::Cycle {
                list: self.list,
                position: self.visited.len(),
            }));
        }

        // SAFETY: non-null links are valid for 'a per the contract of `walk`.
        let node = unsafe { &*self.current };
        self.current = node.next_ptr();
        Some(Ok(node))
    }
}
