/// Builds the ordered command registry from command modules. Each module
/// provides `USAGE`, `SHORT`, `LONG` and `async fn command(&Context, Vec<String>)`.
#[macro_export]
macro_rules! commands {
    ($($module:ident),* $(,)?) => (
      paste::paste! {
        $(
          fn [<run_ $module>](
              ctx: &Context,
              args: Vec<String>,
          ) -> LocalBoxFuture<'_, anyhow::Result<Outcome>> {
              Box::pin($module::command(ctx, args))
          }
        )*

        /// `hk help` lists commands in this order.
        pub static COMMANDS: &[Command] = &[
          $(
            Command {
                usage: $module::USAGE,
                short: $module::SHORT,
                long: $module::LONG,
                run: [<run_ $module>],
            },
          )*
        ];
      }
    );
}
