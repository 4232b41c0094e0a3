/*!
# Introductory Tutorial for unibasic

Run the executable from a terminal. When you see `READY.` the
interpreter is waiting for you. Type CTRL-D to exit and CTRL-C to stop a
running program.

Anything you type without a line number runs immediately.

<pre><code>&nbsp;> PRINT "Hello World"
&nbsp;  Hello World
&nbsp;> T:Hello from PILOT
&nbsp;  Hello from PILOT
</code></pre>

Lines that start with a number are stored in the program instead. Typing
the same number again replaces the line; typing only the number deletes
it. `LIST` shows the program and `RUN` starts it from the top.

<pre><code>&nbsp;> 10 A:NAME$
&nbsp;> 20 T:Nice to meet you, $NAME$.
&nbsp;> 30 FOR I = 1 TO 3
&nbsp;> 40 PRINT I
&nbsp;> 50 NEXT I
&nbsp;> RUN
&nbsp;  ? Ada
&nbsp;  Nice to meet you, Ada.
&nbsp;  1
&nbsp;  2
&nbsp;  3
</code></pre>

## Mixing the languages

BASIC, PILOT and Logo share one set of variables. A PILOT `Y:` sets the
match flag, and only the command right after it is affected:

<pre><code>&nbsp;> 10 A:
&nbsp;> 20 Y:ANSWER = "yes"
&nbsp;> 30 T:Great!
&nbsp;> 40 T:Bye.
</code></pre>

Line 30 prints only when the answer was `yes`. Line 40 always prints.

Logo verbs move the turtle. Output goes to whatever canvas the host
provides; the terminal driver has none, so drawing is silent there.

<pre><code>&nbsp;> REPEAT 4 [FD 50 RT 90]
</code></pre>

## Mistakes

A statement that fails prints a diagnostic starting with `?` and the
program carries on with the next line. Only `END`, `E:` or running off
the end of the program stops a run.

<pre><code>&nbsp;> 10 NEXT
&nbsp;> 20 PRINT "still here"
&nbsp;> RUN
&nbsp;  ?NEXT without FOR in 10
&nbsp;  still here
</code></pre>

*/
