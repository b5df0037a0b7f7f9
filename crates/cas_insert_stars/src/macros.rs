#[macro_export]
macro_rules! define_rule {
    (
        $(#[$meta:meta])*
        $struct_name:ident,
        $name_str:expr,
        | $tree:ident, $node:ident, $options:ident | $body:block
    ) => {
        $(#[$meta])*
        pub struct $struct_name;

        impl $crate::rule::StarRule for $struct_name {
            fn name(&self) -> &str {
                $name_str
            }

            #[allow(unused_variables)]
            fn apply(
                &self,
                $tree: &mut ::cas_ast::Tree,
                $node: ::cas_ast::NodeId,
                $options: &$crate::options::RewriteOptions,
            ) -> Result<Option<$crate::rule::Rewrite>, $crate::error::RewriteError> {
                $body
            }
        }
    };
}
